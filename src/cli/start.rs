use super::{commands, dispatch, telemetry};
use crate::verdict::ServiceState;

/// Main orchestrator - Pure orchestration with no business logic
///
/// Five-step data flow:
/// 1. Parse: Extract CLI arguments
/// 2. Extract Verbosity: `--verbose` switches logging to debug
/// 3. Initialize Telemetry: Set up structured logging on stderr
/// 4. Dispatch: Convert `ArgMatches` into typed Action enum
/// 5. Execute: Run the check and print its verdict
///
/// Returns the process exit code. Anything that goes wrong before the check
/// runs is UNKNOWN; help and version are OK.
pub async fn start() -> i32 {
    // 1. Parse: Extract CLI arguments
    let matches = match commands::new().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ServiceState::Unknown.exit_code()
            } else {
                ServiceState::Ok.exit_code()
            };
        }
    };

    // 2. Extract Verbosity
    let verbose = matches.get_flag("verbose");

    // 3. Initialize Telemetry
    telemetry::init(verbose);

    // 4. Dispatch: Convert ArgMatches into typed Action enum
    let action = match dispatch::dispatch(&matches) {
        Ok(action) => action,
        Err(e) => {
            println!("Error: {e:#}");
            println!("{}", commands::new().render_usage());
            return ServiceState::Unknown.exit_code();
        }
    };

    // 5. Execute: Run the action's business logic
    let verdict = action.execute().await;
    println!("{verdict}");

    verdict.exit_code()
}
