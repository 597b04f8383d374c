//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Serialize config to TOML format
    pub fn to_toml(&self) -> String {
        format!(
            r#"# artic-tui configuration

# Theme: dark, light
theme = "{theme}"

# Collection API
[api]
api_url = "{api_url}"
# Image template: {{image_id}} and {{width}} are substituted
image_url = "{image_url}"
# Width used for image links and clipboard copies
image_width = {image_width}
# Width requested for the terminal preview
preview_width = {preview_width}
request_timeout_secs = {timeout}

# Incremental gallery loader
[gallery]
# Records requested per page
page_size = {page_size}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            theme = self.theme,
            api_url = self.api.api_url,
            image_url = self.api.image_url,
            image_width = self.api.image_width,
            preview_width = self.api.preview_width,
            timeout = self.api.request_timeout_secs,
            page_size = self.gallery.page_size,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
