//! 배송 PIN과 추천 코드 생성

use rand::Rng;

/// 추천 코드 랜덤 부분에 쓰는 문자 (혼동되는 0/O, 1/I 제외)
pub const REFERRAL_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

const REFERRAL_PREFIX_LEN: usize = 4;
const REFERRAL_SUFFIX_LEN: usize = 4;

/// 두 자리 배송 확인 PIN (`"00"`..=`"99"`)
pub fn generate_delivery_pin() -> String {
    let pin: u8 = rand::rng().random_range(0..100);
    format!("{:02}", pin)
}

/// 이름 앞 네 글자(영문 대문자) + 랜덤 네 글자
///
/// 이름에 영문자가 부족하면 `X`로 채웁니다.
pub fn generate_referral_code(name: &str) -> String {
    let mut rng = rand::rng();
    let mut code = referral_prefix(name);

    for _ in 0..REFERRAL_SUFFIX_LEN {
        let idx = rng.random_range(0..REFERRAL_ALPHABET.len());
        code.push(REFERRAL_ALPHABET[idx] as char);
    }

    code
}

pub fn referral_prefix(name: &str) -> String {
    let mut prefix: String = name
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .take(REFERRAL_PREFIX_LEN)
        .map(|c| c.to_ascii_uppercase())
        .collect();

    while prefix.len() < REFERRAL_PREFIX_LEN {
        prefix.push('X');
    }
    prefix
}

/// 형식이 맞는 추천 코드인지 확인합니다 (존재 여부는 확인하지 않음).
pub fn is_well_formed_referral_code(code: &str) -> bool {
    code.is_ascii()
        && code.len() == REFERRAL_PREFIX_LEN + REFERRAL_SUFFIX_LEN
        && code[..REFERRAL_PREFIX_LEN].chars().all(|c| c.is_ascii_uppercase())
        && code[REFERRAL_PREFIX_LEN..].bytes().all(|b| REFERRAL_ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_pin_is_two_digits() {
        for _ in 0..500 {
            let pin = generate_delivery_pin();
            assert_eq!(pin.len(), 2);
            assert!(pin.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_referral_prefix() {
        assert_eq!(referral_prefix("Aline Uwase"), "ALIN");
        assert_eq!(referral_prefix("jo"), "JOXX");
        assert_eq!(referral_prefix("M. K-9"), "MKXX");
        assert_eq!(referral_prefix(""), "XXXX");
    }

    #[test]
    fn test_referral_code_format() {
        for _ in 0..200 {
            let code = generate_referral_code("Eric Mugisha");
            assert!(code.starts_with("ERIC"));
            assert!(is_well_formed_referral_code(&code), "bad code {}", code);
        }
    }

    #[test]
    fn test_malformed_referral_codes() {
        assert!(!is_well_formed_referral_code("ERIC"));
        assert!(!is_well_formed_referral_code("eric2345"));
        assert!(!is_well_formed_referral_code("ERIC0O1I"));
        assert!(is_well_formed_referral_code("ERIC2A9Z"));
    }
}
