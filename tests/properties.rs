use crumb::{options::ParseOptions, parse, CookieMap, Cookies, Error, Signer};
use proptest::prelude::*;

fn name() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_!#$&'*+.^`|~-]{1,16}"
}

fn value() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 _!#$&'()*+./:<>?@^`|~-]{0,24}"
}

fn hex_digit(nibble: u8) -> char {
    char::from_digit(u32::from(nibble), 16).unwrap()
}

proptest! {
    #[test]
    fn single_pair(name in name(), value in value()) {
        let header = format!("{}={}", name, value);
        let cookies = parse(&header).unwrap();

        prop_assert_eq!(cookies.len(), 1);
        prop_assert_eq!(&*cookies[name.as_str()], value.trim());
    }

    #[test]
    fn first_occurrence_wins(name in name(), first in value(), second in value()) {
        let header = format!("{0}={1};{0}={2}", name, first, second);
        let cookies = parse(&header).unwrap();

        prop_assert_eq!(cookies.len(), 1);
        prop_assert_eq!(&*cookies[name.as_str()], first.trim());
    }

    #[test]
    fn surrounding_spaces(name in name(), value in "[a-z0-9]{1,12}", pad in 0usize..4) {
        let spaces = " ".repeat(pad);
        let header = format!("{0}{1}{0}={0}{2}{0}", spaces, name, value);
        let cookies = parse(&header).unwrap();

        prop_assert_eq!(&*cookies[name.as_str()], value.as_str());
    }

    #[test]
    fn never_panics(header in any::<String>()) {
        let _ = parse(&header).unwrap();
    }

    #[test]
    fn never_panics_on_bytes(header in proptest::collection::vec(any::<u8>(), 0..64)) {
        match parse(&header) {
            Ok(_) => prop_assert!(std::str::from_utf8(&header).is_ok()),
            Err(err) => prop_assert_eq!(err, Error::InputType),
        }
    }

    #[test]
    fn sign_round_trip(
        secret in proptest::collection::vec(any::<u8>(), 0..64),
        value in "[^.]{1,32}",
    ) {
        let signer = Signer::new(&secret);
        let signed = signer.sign(&value);

        prop_assert_eq!(signed.len(), value.len() + 1 + 64);
        prop_assert_eq!(signer.unsign(&signed), Ok(value.as_str()));
    }

    #[test]
    fn digest_tampering(value in "[a-z0-9]{1,16}", index in 0usize..64, shift in 1u8..16) {
        let signer = Signer::new("secretKey");
        let signed = signer.sign(&value);

        let position = value.len() + 1 + index;
        let original = signed.as_bytes()[position];
        let nibble = (original as char).to_digit(16).unwrap() as u8;

        let mut tampered = signed.clone();
        tampered.replace_range(position..=position, &hex_digit((nibble + shift) % 16).to_string());

        prop_assert_eq!(signer.unsign(&tampered), Err(Error::MalformedSignature));
    }

    #[test]
    fn value_tampering(value in "[a-z0-9]{1,16}", extra in "[a-z0-9]{1,4}") {
        let signer = Signer::new("secretKey");
        let signed = signer.sign(&value);
        let tampered = format!("{}{}", extra, signed);

        prop_assert_eq!(signer.unsign(&tampered), Err(Error::MalformedSignature));
    }

    #[test]
    fn secret_change(value in "[a-z0-9]{1,16}", a in "[a-z]{1,8}", b in "[A-Z]{1,8}") {
        let signed = Signer::new(&a).sign(&value);

        prop_assert_eq!(Signer::new(&b).unsign(&signed), Err(Error::MalformedSignature));
    }

    #[test]
    fn signed_header(names in proptest::collection::btree_set("[a-z]{1,8}", 1..6)) {
        let signer = Signer::new("secretKey");
        let header = names
            .iter()
            .map(|name| format!("{}={}", name, signer.sign(name)))
            .collect::<Vec<_>>()
            .join("; ");

        let options = ParseOptions {
            verifier: Some(&signer),
            ..ParseOptions::default()
        };
        let cookies: CookieMap = Cookies::parse(&header, &options).unwrap();

        prop_assert_eq!(cookies.len(), names.len());
        for name in &names {
            prop_assert_eq!(&*cookies[name.as_str()], name.as_str());
        }
    }
}
