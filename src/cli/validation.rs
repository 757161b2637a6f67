use crate::cli::args::CliArgs;
use crate::i18n::Language;
use crate::output::OutputFormat;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.lang.as_deref() {
        raw.parse::<Language>()
            .map_err(|e| format!("invalid --lang '{raw}': {e}"))?;
    }
    if let Some(raw) = args.format.as_deref() {
        if OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid --format '{raw}', expected text, json, or html"
            ));
        }
    }
    if args.timeout == Some(0) {
        return Err("invalid timeout, expected positive integer".to_string());
    }
    if args.interactive && args.output.is_some() {
        return Err("--interactive writes to stdout and cannot be combined with --output".to_string());
    }
    Ok(())
}
