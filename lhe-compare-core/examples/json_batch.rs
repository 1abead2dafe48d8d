use lhe_compare_core::{CoreConfigBuilder, EventDispatcher, FailurePolicy, JsonEventHandler};
use std::env;
use std::sync::Arc;

// Compares every identifier given on the command line, emitting JSON events.
//
//   cargo run -p lhe-compare-core --example json_batch -- foreman akiyo
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let work_dir = env::var("LHE_WORK_DIR").unwrap_or_else(|_| "files".to_string());

    let mut failed = 0;
    for identifier in env::args().skip(1) {
        let config = CoreConfigBuilder::new()
            .work_dir(&work_dir)
            .failure_policy(FailurePolicy::BestEffort)
            .build();

        let mut events = EventDispatcher::new();
        events.add_handler(Arc::new(JsonEventHandler::new()));

        let summary = lhe_compare_core::run_comparison(config, &identifier, events)?;
        if !summary.succeeded() {
            failed += 1;
        }
    }

    if failed > 0 {
        eprintln!("{} comparison(s) had failing stages", failed);
        std::process::exit(1);
    }
    Ok(())
}
