//! Best-fit downconversion for the `$ansi` and `$ascii` functions.
//!
//! Both conversions work per code point from one fixed table. Anything the
//! target repertoire cannot show and the table does not cover becomes `?`.

/// Convert text to the Windows-1252 repertoire.
///
/// ASCII, Latin-1 and the Windows-1252 extras are kept as they are; other
/// code points use the best-fit table.
pub fn to_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if is_ansi(c) {
            out.push(c);
        } else {
            out.push_str(best_fit(c).unwrap_or("?"));
        }
    }
    out
}

/// Convert text to printable ASCII plus the ASCII control characters.
pub fn to_ascii(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            out.push_str(best_fit(c).unwrap_or("?"));
        }
    }
    out
}

/// Code points that Windows-1252 can represent.
fn is_ansi(c: char) -> bool {
    c.is_ascii()
        || ('\u{00a0}'..='\u{00ff}').contains(&c)
        || matches!(
            c,
            '\u{20ac}'
                | '\u{201a}'
                | '\u{0192}'
                | '\u{201e}'
                | '\u{2026}'
                | '\u{2020}'
                | '\u{2021}'
                | '\u{02c6}'
                | '\u{2030}'
                | '\u{0160}'
                | '\u{2039}'
                | '\u{0152}'
                | '\u{017d}'
                | '\u{2018}'
                | '\u{2019}'
                | '\u{201c}'
                | '\u{201d}'
                | '\u{2022}'
                | '\u{2013}'
                | '\u{2014}'
                | '\u{02dc}'
                | '\u{2122}'
                | '\u{0161}'
                | '\u{203a}'
                | '\u{0153}'
                | '\u{017e}'
                | '\u{0178}'
        )
}

/// ASCII replacement for a non-ASCII code point.
fn best_fit(c: char) -> Option<&'static str> {
    let fit = match c {
        '\u{00a0}' | '\u{2000}'..='\u{200a}' => " ",
        '\u{00a1}' => "!",
        '\u{00a2}' | '\u{00e7}' | '\u{0107}' | '\u{0109}' | '\u{010b}' | '\u{010d}' => "c",
        '\u{00a3}' | '\u{0139}' | '\u{013b}' | '\u{013d}' | '\u{013f}' | '\u{0141}' => "L",
        '\u{00a5}' | '\u{00dd}' | '\u{0176}' | '\u{0178}' => "Y",
        '\u{00a6}' => "|",
        '\u{00a7}' | '\u{015a}' | '\u{015c}' | '\u{015e}' | '\u{0160}' => "S",
        '\u{00a8}' | '\u{201c}'..='\u{201f}' | '\u{2033}' => "\"",
        '\u{00a9}' => "(c)",
        '\u{00aa}' | '\u{00e0}'..='\u{00e5}' | '\u{0101}' | '\u{0103}' | '\u{0105}' => "a",
        '\u{00ab}' => "<<",
        '\u{00ac}' | '\u{00ad}' | '\u{00af}' | '\u{2010}'..='\u{2015}' => "-",
        '\u{00ae}' => "(R)",
        '\u{00b0}'
        | '\u{00ba}'
        | '\u{00f2}'..='\u{00f6}'
        | '\u{00f8}'
        | '\u{014d}'
        | '\u{014f}'
        | '\u{0151}' => "o",
        '\u{00b1}' => "+-",
        '\u{00b2}' => "2",
        '\u{00b3}' => "3",
        '\u{00b4}' | '\u{2018}'..='\u{201b}' | '\u{2032}' => "'",
        '\u{00b5}'
        | '\u{00f9}'..='\u{00fc}'
        | '\u{0169}'
        | '\u{016b}'
        | '\u{016d}'
        | '\u{016f}'
        | '\u{0171}'
        | '\u{0173}' => "u",
        '\u{00b6}' => "P",
        '\u{00b7}' => ".",
        '\u{00b8}' => ",",
        '\u{00b9}' => "1",
        '\u{00bb}' => ">>",
        '\u{00bc}' => "1/4",
        '\u{00bd}' => "1/2",
        '\u{00be}' => "3/4",
        '\u{00bf}' => "?",
        '\u{00c0}'..='\u{00c5}' | '\u{0100}' | '\u{0102}' | '\u{0104}' => "A",
        '\u{00c6}' => "AE",
        '\u{00c7}' | '\u{0106}' | '\u{0108}' | '\u{010a}' | '\u{010c}' => "C",
        '\u{00c8}'..='\u{00cb}'
        | '\u{0112}'
        | '\u{0114}'
        | '\u{0116}'
        | '\u{0118}'
        | '\u{011a}' => "E",
        '\u{00cc}'..='\u{00cf}'
        | '\u{0128}'
        | '\u{012a}'
        | '\u{012c}'
        | '\u{012e}'
        | '\u{0130}' => "I",
        '\u{00d0}' | '\u{010e}' | '\u{0110}' => "D",
        '\u{00d1}' | '\u{0143}' | '\u{0145}' | '\u{0147}' | '\u{014a}' => "N",
        '\u{00d2}'..='\u{00d6}' | '\u{00d8}' | '\u{014c}' | '\u{014e}' | '\u{0150}' => "O",
        '\u{00d7}' => "x",
        '\u{00d9}'..='\u{00dc}'
        | '\u{0168}'
        | '\u{016a}'
        | '\u{016c}'
        | '\u{016e}'
        | '\u{0170}'
        | '\u{0172}' => "U",
        '\u{00de}' => "Th",
        '\u{00df}' => "ss",
        '\u{00e6}' => "ae",
        '\u{00e8}'..='\u{00eb}'
        | '\u{0113}'
        | '\u{0115}'
        | '\u{0117}'
        | '\u{0119}'
        | '\u{011b}' => "e",
        '\u{00ec}'..='\u{00ef}'
        | '\u{0129}'
        | '\u{012b}'
        | '\u{012d}'
        | '\u{012f}'
        | '\u{0131}' => "i",
        '\u{00f0}' | '\u{010f}' | '\u{0111}' => "d",
        '\u{00f1}' | '\u{0144}' | '\u{0146}' | '\u{0148}' | '\u{014b}' => "n",
        '\u{00f7}' => "/",
        '\u{00fd}' | '\u{00ff}' | '\u{0177}' => "y",
        '\u{00fe}' => "th",
        '\u{011c}' | '\u{011e}' | '\u{0120}' | '\u{0122}' => "G",
        '\u{011d}' | '\u{011f}' | '\u{0121}' | '\u{0123}' => "g",
        '\u{0124}' | '\u{0126}' => "H",
        '\u{0125}' | '\u{0127}' => "h",
        '\u{0132}' => "IJ",
        '\u{0133}' => "ij",
        '\u{0134}' => "J",
        '\u{0135}' => "j",
        '\u{0136}' => "K",
        '\u{0137}' | '\u{0138}' => "k",
        '\u{013a}' | '\u{013c}' | '\u{013e}' | '\u{0140}' | '\u{0142}' => "l",
        '\u{0149}' => "'n",
        '\u{0152}' => "OE",
        '\u{0153}' => "oe",
        '\u{0154}' | '\u{0156}' | '\u{0158}' => "R",
        '\u{0155}' | '\u{0157}' | '\u{0159}' => "r",
        '\u{015b}' | '\u{015d}' | '\u{015f}' | '\u{0161}' | '\u{017f}' => "s",
        '\u{0162}' | '\u{0164}' | '\u{0166}' => "T",
        '\u{0163}' | '\u{0165}' | '\u{0167}' => "t",
        '\u{0174}' => "W",
        '\u{0175}' => "w",
        '\u{0179}' | '\u{017b}' | '\u{017d}' => "Z",
        '\u{017a}' | '\u{017c}' | '\u{017e}' => "z",
        '\u{0192}' => "f",
        '\u{02c6}' => "^",
        '\u{02dc}' => "~",
        '\u{2020}' | '\u{2021}' => "+",
        '\u{2022}' => "*",
        '\u{2026}' => "...",
        '\u{2030}' => "%",
        '\u{2039}' => "<",
        '\u{203a}' => ">",
        '\u{20ac}' => "EUR",
        '\u{2122}' => "TM",
        _ => return None,
    };
    Some(fit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_folds_accents() {
        assert_eq!(to_ascii("Björk Guðmundsdóttir"), "Bjork Gudmundsdottir");
        assert_eq!(to_ascii("Motörhead"), "Motorhead");
        assert_eq!(to_ascii("Straße"), "Strasse");
        assert_eq!(to_ascii("Łódź"), "Lodz");
    }

    #[test]
    fn ascii_folds_typography() {
        assert_eq!(to_ascii("\u{201c}Hi\u{201d} \u{2013} it\u{2019}s"), "\"Hi\" - it's");
        assert_eq!(to_ascii("Wait\u{2026}"), "Wait...");
    }

    #[test]
    fn ansi_keeps_latin1_and_cp1252_extras() {
        assert_eq!(to_ansi("Björk"), "Björk");
        assert_eq!(to_ansi("\u{20ac}5 \u{2014} Œuvre"), "\u{20ac}5 \u{2014} Œuvre");
    }

    #[test]
    fn ansi_best_fits_outside_cp1252() {
        assert_eq!(to_ansi("Łódź"), "Lódz");
        assert_eq!(to_ansi("\u{2010}"), "-");
    }

    #[test]
    fn unmapped_code_points_become_question_marks() {
        assert_eq!(to_ascii("新しい"), "???");
        assert_eq!(to_ansi("新しい"), "???");
        assert_eq!(to_ascii("\u{0080}"), "?");
        assert_eq!(to_ansi("\u{0080}"), "?");
    }
}
