use crate::logging::codes;

/// Check every stage's error codes before any input is processed
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating pipeline configuration");

    let checks = [
        crate::file_processor::init_file_processor_logging(),
        crate::lexical::init_lexical_analysis_logging(),
        crate::syntax::init_syntax_logging(),
    ];

    if let Some(Err(message)) = checks.iter().find(|check| check.is_err()) {
        crate::log_error!(codes::system::INITIALIZATION_FAILURE, "Pipeline validation failed",
            "reason" => message
        );
        return Err(message.clone());
    }

    crate::log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Pipeline validation succeeded",
        "stages_validated" => checks.len()
    );

    Ok(())
}
