// src/config/consts.rs

// Files
pub const DEFAULT_CONFIG_FILE: &str = "config.json";
pub const DEFAULT_SHEET_FILE: &str = "jobs.csv";
pub const DEFAULT_SEEN_FILE: &str = "seen_links.txt";

// Sheet
pub const SHEET_HEADER: [&str; 5] = ["Title", "Company", "Apply Link", "Source", "Posted"];

// Limits
pub const DEFAULT_MAX_JOBS: usize = 50;
pub const DEFAULT_MAX_PAGES: usize = 5;
pub const DEFAULT_PAGE_DELAY_MS: u64 = 3_000; // be polite

// Net
pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

// RemoteRocketship
pub const RRS_BASE: &str = "https://www.remoterocketship.com";
pub const RRS_SEARCH_PATH: &str = "/country/india/jobs/product-manager";
pub const RRS_SEARCH_QUERY: &str = "sort=DateAdded&jobTitle=Product+Manager&locations=India";

// LinkedIn
pub const LINKEDIN_BASE: &str = "https://www.linkedin.com";
pub const LINKEDIN_LOGIN_PATH: &str = "/login";
pub const LINKEDIN_LOGIN_SUBMIT_PATH: &str = "/checkpoint/lg/login-submit";
pub const LINKEDIN_SEARCH_PATH: &str = "/jobs/search/";
// product manager, remote, posted in the last 24h
pub const LINKEDIN_SEARCH_QUERY: &str = "keywords=product%20manager&location=Remote&f_TPR=r86400&f_WT=2";
pub const LINKEDIN_PAGE_SIZE: usize = 25;
