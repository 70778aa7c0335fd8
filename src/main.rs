use std::{env, error::Error};

use log::{debug, info};
use sched_sim::{Scheduler, Sim, SimConfig, logger};

fn main() -> Result<(), Box<dyn Error>> {
    logger::init(logger::level_from_env())?;

    let config = match env::args().nth(1) {
        Some(path) => {
            info!("Loading config from {path}");
            SimConfig::from_path(&path)?
        }
        None => SimConfig::default(),
    };

    let jobs = config.workload.jobs();
    info!("Workload: {} jobs", jobs.len());

    let mut reports = Vec::with_capacity(config.policies.len());
    for policy_config in &config.policies {
        let policy = policy_config.build();
        debug!("Running {}", policy.name());

        let mut sim = Sim::new(jobs.clone(), policy);
        reports.push(sim.run());
    }

    if config.json_output {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!("{report}\n");
        }
    }

    Ok(())
}
