use crate::error::AppResult;
use std::fs;
use std::path::Path;
use tracing::info;

/// Count the contacts in a vCard file that carry at least one phone-number
/// field. The records themselves are discarded; only the count survives.
pub fn import_count(path: &Path) -> AppResult<usize> {
    let content = fs::read_to_string(path)?;
    let count = count_phone_contacts(&content);
    info!(count, "Imported contacts");
    Ok(count)
}

fn count_phone_contacts(vcf: &str) -> usize {
    let mut count = 0;
    let mut in_card = false;
    let mut has_phone = false;

    for line in vcf.lines() {
        let line = line.trim();
        if line.eq_ignore_ascii_case("BEGIN:VCARD") {
            in_card = true;
            has_phone = false;
        } else if line.eq_ignore_ascii_case("END:VCARD") {
            if in_card && has_phone {
                count += 1;
            }
            in_card = false;
        } else if in_card && is_tel_line(line) {
            has_phone = true;
        }
    }

    count
}

/// A TEL property, bare (`TEL:`) or with parameters (`TEL;TYPE=CELL:`)
fn is_tel_line(line: &str) -> bool {
    let upper = line.to_ascii_uppercase();
    upper.starts_with("TEL:") || upper.starts_with("TEL;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_only_contacts_with_phone_numbers() {
        let vcf = "BEGIN:VCARD\nFN:Alice\nTEL;TYPE=CELL:+5491122334455\nEND:VCARD\n\
                   BEGIN:VCARD\nFN:Bob\nEMAIL:bob@example.com\nEND:VCARD\n\
                   BEGIN:VCARD\nFN:Carol\nTEL:+123\nTEL:+456\nEND:VCARD\n";
        assert_eq!(count_phone_contacts(vcf), 2);
    }

    #[test]
    fn empty_file_counts_zero() {
        assert_eq!(count_phone_contacts(""), 0);
    }

    #[test]
    fn tel_outside_a_card_is_ignored() {
        assert_eq!(count_phone_contacts("TEL:+123\n"), 0);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(import_count(Path::new("definitely/not/here.vcf")).is_err());
    }
}
