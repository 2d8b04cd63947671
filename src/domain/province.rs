//! Province name normalization.
//!
//! Province names arrive as free text ("Castilla/La Mancha", "A Coruña",
//! " Cáceres ") and are turned into the key under which the province's
//! boundary file is stored on disk.

use unicode_normalization::UnicodeNormalization;

const COMBINING_TILDE: char = '\u{0303}';

/// Combining Diacritical Marks block (U+0300..=U+036F).
fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Turns a user supplied province name into its boundary-file key.
///
/// Slashes become hyphens, `ñ`/`Ñ` become `n`/`N`, all whitespace is
/// removed and diacritics are stripped. Case is preserved. A decomposed
/// `n` + single combining tilde is left alone and recomposes to `ñ`.
pub fn normalize(input: &str) -> String {
    let replaced: String = input
        .chars()
        .map(|c| match c {
            '/' => '-',
            'ñ' => 'n',
            'Ñ' => 'N',
            other => other,
        })
        .collect();

    let compact: String = replaced
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let decomposed: Vec<char> = compact.nfd().collect();
    let stripped = strip_marks(&decomposed);
    stripped.nfc().collect()
}

/// Drops every run of combining marks that follows a base character,
/// except a lone combining tilde directly after `n`/`N`.
fn strip_marks(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        out.push(c);
        i += 1;
        if is_combining_mark(c) {
            // Marks without a preceding base character are kept.
            continue;
        }

        let run_start = i;
        while i < chars.len() && is_combining_mark(chars[i]) {
            i += 1;
        }
        let run = &chars[run_start..i];
        let protected_enye = matches!(c, 'n' | 'N') && run == [COMBINING_TILDE];
        if protected_enye {
            out.extend(run);
        }
    }
    out
}
