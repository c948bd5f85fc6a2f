use crate::*;

const ADDRESS_BODY_LEN: usize = 40;
const LOOP_DECIMALS: u32 = 18;
const ELLIPSIS: &str = "..";

/// Parses an integer given either as `0x`-prefixed hex or as decimal.
pub fn parse_int(s: &str) -> Result<u128> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u128::from_str_radix(hex, 16),
        None => s.parse(),
    };
    Ok(parsed.map_err(|_| ReportError::InvalidNumber(s.to_owned()))?)
}

pub fn parse_u64(s: &str) -> Result<u64> {
    let value = parse_int(s)?;
    if value > u128::from(u64::max_value()) {
        return Err(ReportError::InvalidNumber(s.to_owned()).into());
    }
    Ok(value as u64)
}

/// Normalizes an account or contract address to lowercase `hx…`/`cx…` form.
///
/// A bare 40-hex string is taken as an account address.
pub fn ensure_address(addr: &str) -> Result<String> {
    let lower = addr.trim().to_lowercase();
    let (prefix, body) = if lower.starts_with("hx") || lower.starts_with("cx") {
        lower.split_at(2)
    } else {
        ("hx", lower.as_str())
    };
    if body.len() != ADDRESS_BODY_LEN || !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ReportError::InvalidAddress(addr.to_owned()).into());
    }
    Ok(format!("{}{}", prefix, body))
}

/// Where the text is cut when it does not fit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shorten {
    Left,
    Middle,
    Right,
}

/// Shortens `s` to at most `size` characters, marking the cut with `..`.
pub fn shorten(s: &str, size: usize, mode: Shorten) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= size {
        return s.to_owned();
    }
    if size <= ELLIPSIS.len() {
        return chars[..size].iter().collect();
    }
    let keep = size - ELLIPSIS.len();
    let (head, tail) = match mode {
        Shorten::Left => (0, keep),
        Shorten::Right => (keep, 0),
        Shorten::Middle => ((keep + 1) / 2, keep / 2),
    };
    let mut out: String = chars[..head].iter().collect();
    out.push_str(ELLIPSIS);
    out.extend(&chars[chars.len() - tail..]);
    out
}

/// Renders an amount in loop (10^-18 units) with `places` fraction digits.
/// Digits beyond `places` are truncated.
pub fn format_decimals(value: &str, places: u32) -> Result<String> {
    let amount = parse_int(value)?;
    let unit = 10u128.pow(LOOP_DECIMALS);
    let integer = amount / unit;
    if places == 0 {
        return Ok(integer.to_string());
    }
    let places = places.min(LOOP_DECIMALS);
    let fraction = (amount % unit) / 10u128.pow(LOOP_DECIMALS - places);
    Ok(format!(
        "{}.{:0width$}",
        integer,
        fraction,
        width = places as usize
    ))
}

/// Splits every argument on commas, so `-c id,to -c value` reads as three items.
pub fn expand_comma<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.as_ref().split(','))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}
