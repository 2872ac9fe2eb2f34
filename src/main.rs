//! openapi4aws: augment OpenAPI documents for AWS API Gateway
//!
//! Injects `x-amazon-apigateway-integration`, `x-amazon-apigateway-authorizer`
//! and `security` blocks driven entirely by command-line configuration.

use std::process::ExitCode;

fn main() -> ExitCode {
    match openapi4aws::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
