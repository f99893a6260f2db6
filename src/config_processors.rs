use justconfig::error::ConfigError;
use justconfig::item::{MapAction, StringItem};

/// Strips one pair of surrounding quotes from configuration values, so file
/// paths with spaces can be written as `data.property_table_path = "my data/x.csv"`.
pub trait Unquote
where
    Self: Sized,
{
    fn unquote(self) -> Result<StringItem, ConfigError>;
}

fn strip_quotes(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    ['"', '\''].iter().find_map(|quote| {
        trimmed
            .strip_prefix(*quote)
            .and_then(|rest| rest.strip_suffix(*quote))
    })
}

impl Unquote for Result<StringItem, ConfigError> {
    fn unquote(self) -> Result<StringItem, ConfigError> {
        self?.map(|value| match strip_quotes(value) {
            Some(inner) => MapAction::Replace(vec![inner.to_owned()]),
            None => MapAction::Keep,
        })
    }
}
