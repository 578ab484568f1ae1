use reportal_client::HttpReportingClient;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ReportingClientBox;

/// The reporting backend client, pointed at the configured base URL.
pub fn build_reporting_client() -> ReportingClientBox {
    return Box::new(HttpReportingClient::new(Config::get(ConfigKey::ApiURL)));
}
