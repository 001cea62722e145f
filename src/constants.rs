/// User agent string for HTTP requests
pub const USER_AGENT: &str = "openweather-mcp-server/0.1.0";

/// OpenWeather API base URL
pub const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org/data/2.5";

/// Base URL for OpenWeather condition icons
pub const ICON_URL_BASE: &str = "https://openweathermap.org/img/wn/";

/// Suffix selecting the 2x-resolution icon variant
pub const ICON_URL_SUFFIX: &str = "@2x.png";

/// Environment variable holding the API credential
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// The forecast endpoint emits one entry per 3-hour interval, 8 per day
pub const FORECAST_ENTRIES_PER_DAY: u32 = 8;
