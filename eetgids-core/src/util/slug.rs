use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_ALNUM: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ò' | 'ó' | 'ô' | 'ö' | 'õ' | 'ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        'ÿ' => 'y',
        c => c,
    }
}

/// URL path segment derived from a display name,
/// e.g. "Café 't Hoekje" becomes "cafe-t-hoekje".
pub fn slugify(name: &str) -> String {
    let folded: String = name
        .to_lowercase()
        .chars()
        .map(fold_diacritic)
        .filter(|c| *c != '\'')
        .collect();
    NON_ALNUM
        .replace_all(&folded, "-")
        .trim_matches('-')
        .to_owned()
}

/// Appends a numeric suffix until `is_taken` returns false.
pub fn unique_slug<E>(
    base: &str,
    mut is_taken: impl FnMut(&str) -> Result<bool, E>,
) -> Result<String, E> {
    if !is_taken(base)? {
        return Ok(base.to_owned());
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if !is_taken(&candidate)? {
            return Ok(candidate);
        }
        n += 1;
    }
}
