// src/pipeline/validate.rs

use crate::error::{AppError, Result};
use crate::models::{BoardRequest, Config};
use crate::utils::extract_organization;

/// Validate configuration and board requests without touching the network.
///
/// Returns the number of requests that resolve to an organization. Requests
/// that don't are reported; they would be skipped by a scrape.
pub fn run_validate(config: &Config, requests: &[BoardRequest]) -> Result<usize> {
    log::info!("Validating configuration...");
    config.validate()?;
    log::info!("✓ Config OK");
    log::info!("    API endpoint: {}", config.client.api_url);
    log::info!("    Board host: {}", config.client.board_host);
    log::info!(
        "    Detail spacing: {} ms, concurrency: {}",
        config.client.request_delay_ms,
        config.client.max_concurrent
    );

    let mut valid = 0;
    for request in requests {
        if let Some(reason) = &request.rejection {
            log::warn!("    ✗ {}", reason);
            continue;
        }
        match extract_organization(&request.url, &config.client.board_host) {
            Some(organization) => {
                valid += 1;
                log::info!("    ✓ {} -> {}", request.url, organization);
            }
            None => log::warn!("    ✗ {}: no organization identifier", request.url),
        }
    }

    if valid == 0 {
        return Err(AppError::validation(format!(
            "None of the {} board URL(s) point at {}",
            requests.len(),
            config.client.board_host
        )));
    }

    log::info!("✓ {} of {} board(s) valid", valid, requests.len());
    Ok(valid)
}
