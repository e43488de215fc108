/// Query string decoding and encoding
use crate::UriError;

/// Decodes `a=1&b=x%20y` into ordered `(name, value)` pairs
///
/// Empty segments are skipped, a segment without `=` yields an empty value,
/// and `+` is read as a space.
///
/// # Examples
///
/// ```
/// use bridge_uri::query::parse_query;
///
/// let pairs = parse_query("a=1&&b=x+y&flag").unwrap();
/// assert_eq!(pairs, vec![
///     ("a".to_string(), "1".to_string()),
///     ("b".to_string(), "x y".to_string()),
///     ("flag".to_string(), String::new()),
/// ]);
/// ```
pub fn parse_query(query: &str) -> Result<Vec<(String, String)>, UriError> {
    query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (name, value) = segment.split_once('=').unwrap_or((segment, ""));
            Ok((decode_component(name)?, decode_component(value)?))
        })
        .collect()
}

fn decode_component(component: &str) -> Result<String, UriError> {
    let spaced = component.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| UriError::InvalidEncoding(component.to_string()))
}

/// Encodes pairs into a query string, percent-encoding names and values
///
/// # Examples
///
/// ```
/// use bridge_uri::query::encode_query;
///
/// assert_eq!(encode_query([("a", "1"), ("next", "/x y")]), "a=1&next=%2Fx%20y");
/// assert_eq!(encode_query(Vec::<(&str, &str)>::new()), "");
/// ```
pub fn encode_query<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .into_iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                urlencoding::encode(name.as_ref()),
                urlencoding::encode(value.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
