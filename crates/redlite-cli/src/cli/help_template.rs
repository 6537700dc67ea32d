// Help text template with placeholder
pub const HELP_TEMPLATE: &str = r#"Examples:
  # Strings
  %BINARY_NAME% ./data set greeting "Hello, world!"
  %BINARY_NAME% ./data get greeting

  # Lists
  %BINARY_NAME% ./data rpush jobs resize upload
  %BINARY_NAME% ./data lpush jobs urgent
  %BINARY_NAME% ./data range jobs 0 -1
  %BINARY_NAME% ./data lpop jobs

  # Inspecting and deleting
  %BINARY_NAME% ./data type jobs
  %BINARY_NAME% --read-only ./data len jobs
  %BINARY_NAME% ./data del jobs
"#;
