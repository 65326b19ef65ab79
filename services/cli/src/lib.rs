mod cli;
mod commands;

use loan_policy::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
