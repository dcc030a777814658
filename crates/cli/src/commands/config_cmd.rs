//! `switchboard config` — Inspect and validate the configuration.

use switchboard_agent::specialists::domain_for_name;
use switchboard_config::AppConfig;

pub async fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");
    println!();

    match AppConfig::load() {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let mut warnings: Vec<String> = Vec::new();
            if !config.has_api_key() {
                warnings.push(
                    "No API key set (set SWITCHBOARD_API_KEY or WRITER_API_KEY env var)".to_string(),
                );
            }
            for name in config.specialists.keys() {
                if domain_for_name(name).is_none() {
                    warnings.push(format!("specialists.{name} does not match a known domain"));
                }
            }

            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                for warning in &warnings {
                    println!("   ⚠️  {warning}");
                }
            }

            println!();
            println!("   Model:       {}", config.default_model);
            println!("   Temperature: {}", config.default_temperature);
            println!("   Memory:      {}", config.memory.backend);
            println!("   Recall:      {} entries", config.memory.recall_limit);
            println!("   Specialists: {} overridden", config.specialists.len());
            Ok(())
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            Err(e.into())
        }
    }
}

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    // Never echo the key itself, even when it came from the file.
    config.api_key = config.api_key.map(|_| "[REDACTED]".to_string());

    let rendered =
        toml::to_string_pretty(&config).map_err(|e| format!("Failed to render config: {e}"))?;
    println!("{rendered}");
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", AppConfig::config_dir().join("config.toml").display());
    Ok(())
}

// ── Tests ────────────────────────────────────────────────────────────────────
