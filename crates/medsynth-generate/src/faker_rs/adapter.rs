use std::collections::HashSet;

use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, StateAbbr, StreetName, ZipCode};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Word;
use fake::faker::name::en::{FirstName, LastName};
use fake::locales::{Data, EN};
use rand::Rng;

/// Cosmetic text values backed by the `fake` crate (en_US locale).
pub struct FakeRsAdapter;

impl FakeRsAdapter {
    pub fn first_name<R: Rng + ?Sized>(rng: &mut R) -> String {
        FirstName().fake_with_rng(rng)
    }

    pub fn last_name<R: Rng + ?Sized>(rng: &mut R) -> String {
        LastName().fake_with_rng(rng)
    }

    pub fn street_address<R: Rng + ?Sized>(rng: &mut R) -> String {
        let number: String = BuildingNumber().fake_with_rng(rng);
        let street: String = StreetName().fake_with_rng(rng);
        format!("{number} {street}")
    }

    pub fn city<R: Rng + ?Sized>(rng: &mut R) -> String {
        CityName().fake_with_rng(rng)
    }

    pub fn state_abbr<R: Rng + ?Sized>(rng: &mut R) -> String {
        StateAbbr().fake_with_rng(rng)
    }

    pub fn zip_code<R: Rng + ?Sized>(rng: &mut R) -> String {
        ZipCode().fake_with_rng(rng)
    }

    pub fn email<R: Rng + ?Sized>(rng: &mut R) -> String {
        SafeEmail().fake_with_rng(rng)
    }

    pub fn company<R: Rng + ?Sized>(rng: &mut R) -> String {
        CompanyName().fake_with_rng(rng)
    }

    /// Lorem word with its first letter upper-cased.
    pub fn capitalized_word<R: Rng + ?Sized>(rng: &mut R) -> String {
        let word: String = Word().fake_with_rng(rng);
        capitalize(&word)
    }

    /// Every distinct value `capitalized_word` can return.
    pub fn capitalized_vocabulary() -> HashSet<String> {
        EN::LOREM_WORD.iter().map(|word| capitalize(word)).collect()
    }

    /// Replace every `#` in `pattern` with a random decimal digit.
    pub fn numerify<R: Rng + ?Sized>(pattern: &str, rng: &mut R) -> String {
        pattern
            .chars()
            .map(|ch| {
                if ch == '#' {
                    char::from(b'0' + rng.random_range(0..10u8))
                } else {
                    ch
                }
            })
            .collect()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn numerify_replaces_only_placeholders() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let phone = FakeRsAdapter::numerify("###-###-####", &mut rng);
        assert_eq!(phone.len(), 12);
        assert_eq!(&phone[3..4], "-");
        assert_eq!(&phone[7..8], "-");
        assert!(phone.chars().filter(|ch| *ch != '-').all(|ch| ch.is_ascii_digit()));
    }

    #[test]
    fn capitalized_word_starts_upper() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..20 {
            let word = FakeRsAdapter::capitalized_word(&mut rng);
            let first = word.chars().next().expect("non-empty word");
            assert!(first.is_uppercase());
        }
    }

    #[test]
    fn vocabulary_covers_drawn_words() {
        let vocabulary = FakeRsAdapter::capitalized_vocabulary();
        assert!(!vocabulary.is_empty());
        assert!(vocabulary.len() <= EN::LOREM_WORD.len());

        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..200 {
            let word = FakeRsAdapter::capitalized_word(&mut rng);
            assert!(vocabulary.contains(&word), "{word} missing from vocabulary");
        }
    }

    #[test]
    fn capitalize_lowercases_tail() {
        assert_eq!(capitalize("qUIA"), "Quia");
        assert_eq!(capitalize(""), "");
    }
}
