//! Slug and display-text helpers shared by loaders, schemas and views.

/// Maximum slug length, in characters
pub const SLUG_MAX_LEN: usize = 200;

/// Characters removed from slugs after hyphenation
const SLUG_BLACKLIST: &[char] = &[
    '&', '/', '\\', '#', ',', '+', '(', ')', '$', '~', '%', '.', '\'', '"', ':', '*', '?', '<',
    '>', '{', '}',
];

/// Turn a URL segment back into a display name.
///
/// Only the first hyphen becomes a space; later hyphens are kept. The first
/// character and the first character after each whitespace run are then
/// uppercased:
/// - `"austin"` → `"Austin"`
/// - `"san-antonio"` → `"San Antonio"`
/// - `"el-paso-west"` → `"El Paso-west"`
pub fn deslug(slug: &str) -> String {
    let replaced = slug.replacen('-', " ", 1);

    let mut out = String::with_capacity(replaced.len());
    let mut at_start = true;
    let mut after_space = false;
    for c in replaced.chars() {
        if c.is_whitespace() {
            after_space = true;
            at_start = false;
            out.push(c);
            continue;
        }
        if (at_start || after_space) && is_word_char(c) {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        at_start = false;
        after_space = false;
    }
    out
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Build a URL slug from a human-readable field such as an address.
///
/// Lowercases, collapses whitespace runs into single hyphens, truncates to
/// [`SLUG_MAX_LEN`] characters and then strips punctuation.
pub fn slugify(input: &str) -> String {
    let lowered = input.to_lowercase();

    let mut hyphenated = String::with_capacity(lowered.len());
    let mut in_space = false;
    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_space {
                hyphenated.push('-');
            }
            in_space = true;
        } else {
            hyphenated.push(c);
            in_space = false;
        }
    }

    hyphenated
        .chars()
        .take(SLUG_MAX_LEN)
        .filter(|c| !SLUG_BLACKLIST.contains(c))
        .collect()
}

/// Format an amount as US dollars with no fractional digits: `2500` → `"$2,500"`.
///
/// Rounds half away from zero.
pub fn format_price(amount: f64) -> String {
    if amount.is_nan() {
        return "NaN".to_string();
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    if amount.is_infinite() {
        return format!("{}$∞", sign);
    }

    // f64 formatting keeps every integer digit, beyond u64 range too
    let digits = format!("{:.0}", amount.abs().round());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}${}", sign, grouped)
}

/// Join the non-empty class tokens with single spaces.
pub fn class_names<'a, I>(tokens: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    tokens
        .into_iter()
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
