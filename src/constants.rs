pub const DEATHS_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/time_series_covid19_deaths_global.csv";
pub const CONFIRMED_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/time_series_covid19_confirmed_global.csv";

pub const DEATHS_FIXTURE: &str = "test_data/Deaths.csv";
pub const CONFIRMED_FIXTURE: &str = "test_data/Confirmed.csv";

pub const HISTORY_FILE: &str = "covid19_history.dat";

// Seconds
pub const DEFAULT_INTERVAL: u64 = 3600;
pub const ERROR_INTERVAL: u64 = 60;
pub const TEST_INTERVAL: u64 = 10;
pub const STORED_INTERVAL: u64 = 300;

pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

pub const SID_VAR: &str = "TWILIO_ACCOUNT_SID";
pub const TOKEN_VAR: &str = "TWILIO_AUTH_TOKEN";
pub const FROM_VAR: &str = "TWILIO_FROM";
pub const TO_VAR: &str = "TWILIO_TO";
