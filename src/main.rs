use anyhow::Context;
use clap::Parser;
use postcode_rules::adapters::range_file;
use postcode_rules::utils::{logger, validation::Validate};
use postcode_rules::{
    CliConfig, Command, ErrorCategory, PostCodeError, PostCodeService, ProvinceRegistry,
    RuleRegistry,
};
use serde_json::json;

/// 一次檢查的輸出：給人看的訊息與 `--json` 用的報告
struct Report {
    message: String,
    json: serde_json::Value,
}

fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Argument validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(2);
    }

    match run(&config) {
        Ok(report) => {
            if config.json {
                println!("{}", report.json);
            } else {
                println!("✅ {}", report.message);
            }
        }
        Err(err) => {
            let postcode_error = err.downcast_ref::<PostCodeError>();
            let exit_code = postcode_error.map(exit_code).unwrap_or(3);
            tracing::debug!("Check failed: {:#}", err);

            if config.json {
                let category = postcode_error.map(|e| format!("{:?}", e.category()));
                println!(
                    "{}",
                    json!({ "ok": false, "error": format!("{:#}", err), "category": category })
                );
            } else {
                let message = postcode_error
                    .map(PostCodeError::user_friendly_message)
                    .unwrap_or_else(|| format!("{:#}", err));
                eprintln!("❌ {}", message);
            }

            std::process::exit(exit_code);
        }
    }
}

/// 0 成功；1 檢查未通過；2 查無資料或輸入錯誤；3 設定或 IO 錯誤
fn exit_code(e: &PostCodeError) -> i32 {
    match e.category() {
        ErrorCategory::Range | ErrorCategory::Overlap => 1,
        ErrorCategory::Input if matches!(e, PostCodeError::FormatMismatch { .. }) => 1,
        ErrorCategory::Input | ErrorCategory::Lookup => 2,
        ErrorCategory::Config | ErrorCategory::Io => 3,
    }
}

fn run(config: &CliConfig) -> anyhow::Result<Report> {
    let custom_rules;
    let rules = match &config.rules {
        Some(path) => {
            custom_rules = RuleRegistry::from_file(path)
                .with_context(|| format!("loading rules from {}", path.display()))?;
            tracing::info!("📁 Using rule table {}", path.display());
            &custom_rules
        }
        None => RuleRegistry::builtin(),
    };
    let service = PostCodeService::new(rules);

    let report = match &config.command {
        Command::Pattern { country } => {
            let info = service.pattern(country)?;
            Report {
                message: format!("{}: {} ({})", info.country_code, info.pattern, info.description),
                json: json!({ "ok": true, "pattern": info }),
            }
        }
        Command::Check { country, code } => {
            let description = service.check_format(country, code)?;
            Report {
                message: format!("'{}' is a valid postcode ({})", code, description),
                json: json!({ "ok": true, "code": code, "description": description }),
            }
        }
        Command::InRange {
            country,
            start,
            end,
            code,
            no_fix,
        } => {
            service.check_in_range(country, start, end, code, !no_fix)?;
            Report {
                message: format!("'{}' is within [{}-{}]", code, start, end),
                json: json!({ "ok": true, "code": code, "start": start, "end": end }),
            }
        }
        Command::Overlap { country, file, .. } => {
            let mut ranges = config.inline_ranges();
            if let Some(file) = file {
                let from_file = range_file::read_ranges_from_path(file)
                    .with_context(|| format!("reading ranges from {}", file.display()))?;
                ranges.extend(from_file);
            }
            service.check_no_overlap(country, &ranges)?;
            Report {
                message: format!("{} ranges checked, no overlap", ranges.len()),
                json: json!({ "ok": true, "ranges": ranges }),
            }
        }
        Command::Province { country, query } => {
            let province = ProvinceRegistry::builtin().check_province(country, query)?;
            Report {
                message: format!("{} {} {}", province.code, province.name, province.cn_name)
                    .trim_end()
                    .to_string(),
                json: json!({ "ok": true, "province": province }),
            }
        }
    };

    Ok(report)
}
