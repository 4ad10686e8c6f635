use std::fmt::Display;

pub fn format_comma_delimited<I: IntoIterator<Item = T>, T: Display>(iter: I) -> String {
    iter.into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
