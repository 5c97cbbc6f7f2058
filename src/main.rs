use app_area::numerical::app_task::{AppTask, DEFAULT_TASK};
use log::error;
use std::error::Error;
use std::process::ExitCode;

fn run() -> Result<(), Box<dyn Error>> {
    let mut task = AppTask::new();
    task.parse_settings_from_str(DEFAULT_TASK)?;
    task.solve()?;
    task.postprocessing()?;
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("APP area analysis failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
