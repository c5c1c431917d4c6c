use unicode_normalizing::{IdnaErrors, Uts46, Uts46Options};

fn uts46(options: Uts46Options) -> Uts46
{
    Uts46::new(options).unwrap()
}

/// ToASCII и ToUnicode без ошибок
macro_rules! valid {
    ($uts46: expr, $name: expr, $ascii: expr, $unicode: expr) => {
        let (result, info) = $uts46.name_to_ascii($name);
        assert_eq!(result, $ascii, "ToASCII({:?})", $name);
        assert!(!info.has_errors(), "ToASCII({:?}): {:?}", $name, info.errors());

        let (result, info) = $uts46.name_to_unicode($name);
        assert_eq!(result, $unicode, "ToUnicode({:?})", $name);
        assert!(!info.has_errors(), "ToUnicode({:?}): {:?}", $name, info.errors());
    };
}

/// ToASCII и ToUnicode с ошибкой
macro_rules! invalid {
    ($uts46: expr, $name: expr, $error: expr) => {
        let (_, info) = $uts46.name_to_ascii($name);
        assert!(info.errors().contains($error), "ToASCII({:?}): {:?}", $name, info.errors());

        let (_, info) = $uts46.name_to_unicode($name);
        assert!(info.errors().contains($error), "ToUnicode({:?}): {:?}", $name, info.errors());
    };
}

#[test]
fn valid_names()
{
    let transitional = uts46(Uts46Options::DEFAULT);

    valid!(transitional, "www.eXample.cOm", "www.example.com", "www.example.com");
    valid!(transitional, "Bücher.de", "xn--bcher-kva.de", "bücher.de");
    valid!(transitional, "XN--BCHER-KVA.de", "xn--bcher-kva.de", "bücher.de");
    valid!(transitional, "ÖBB", "xn--bb-eka", "öbb");
    valid!(transitional, "示例.com", "xn--fsq092h.com", "示例.com");
    valid!(transitional, "ａ．ｂ", "a.b", "a.b");
    valid!(transitional, "a。b", "a.b", "a.b");
    valid!(transitional, "a.b.", "a.b.", "a.b.");
    valid!(transitional, "a_b.de", "a_b.de", "a_b.de");
}

#[test]
fn deviations()
{
    let transitional = uts46(Uts46Options::DEFAULT);
    let nontransitional = uts46(Uts46Options::NONTRANSITIONAL);

    valid!(transitional, "faß.de", "fass.de", "fass.de");
    valid!(nontransitional, "faß.de", "xn--fa-hia.de", "faß.de");

    valid!(transitional, "βόλος.com", "xn--nxasmq6b.com", "βόλοσ.com");
    valid!(nontransitional, "βόλος.com", "xn--nxasmm1c.com", "βόλος.com");

    valid!(transitional, "a\u{200C}b", "ab", "ab");
    valid!(nontransitional, "\u{915}\u{94D}\u{200C}\u{937}", "xn--11b2ezcs70k", "\u{915}\u{94D}\u{200C}\u{937}");

    assert!(transitional.name_to_ascii("faß.de").1.is_transitional_different());
    assert!(!transitional.name_to_ascii("fass.de").1.is_transitional_different());
}

#[test]
fn hyphens()
{
    let uts46 = uts46(Uts46Options::DEFAULT);

    invalid!(uts46, "-abc.de", IdnaErrors::LEADING_HYPHEN);
    invalid!(uts46, "abc-.de", IdnaErrors::TRAILING_HYPHEN);
    invalid!(uts46, "abc.de-", IdnaErrors::TRAILING_HYPHEN);
    invalid!(uts46, "ab--c.de", IdnaErrors::HYPHEN_3_4);
    invalid!(uts46, "-ü.de", IdnaErrors::LEADING_HYPHEN);
    invalid!(uts46, "ü-.de", IdnaErrors::TRAILING_HYPHEN);
}

#[test]
fn empty_labels()
{
    let uts46 = uts46(Uts46Options::DEFAULT);

    invalid!(uts46, "", IdnaErrors::EMPTY_LABEL);
    invalid!(uts46, ".", IdnaErrors::EMPTY_LABEL);
    invalid!(uts46, "a..b", IdnaErrors::EMPTY_LABEL);
    invalid!(uts46, ".a", IdnaErrors::EMPTY_LABEL);
    invalid!(uts46, "ü..b", IdnaErrors::EMPTY_LABEL);
}

#[test]
fn lengths()
{
    let uts46 = uts46(Uts46Options::DEFAULT);

    let label_63 = "a".repeat(63);
    let label_64 = "a".repeat(64);

    let (_, info) = uts46.name_to_ascii(&format!("{}.com", label_63));
    assert!(!info.has_errors());

    let (_, info) = uts46.name_to_ascii(&format!("{}.com", label_64));
    assert_eq!(info.errors(), IdnaErrors::LABEL_TOO_LONG);

    // для ToUnicode длина не проверяется
    let (_, info) = uts46.name_to_unicode(&format!("{}.com", label_64));
    assert!(!info.has_errors());

    // 253 символа, 254 символа, 253 символа с завершающей точкой
    let name_253 = format!("{0}.{0}.{0}.{1}", label_63, "a".repeat(61));
    let name_254 = format!("{0}.{0}.{0}.{1}", label_63, "a".repeat(62));

    assert_eq!(name_253.len(), 253);

    assert!(!uts46.name_to_ascii(&name_253).1.has_errors());
    assert!(!uts46.name_to_ascii(&format!("{}.", name_253)).1.has_errors());
    assert_eq!(uts46.name_to_ascii(&name_254).1.errors(), IdnaErrors::DOMAIN_NAME_TOO_LONG);
    assert!(!uts46.name_to_unicode(&name_254).1.has_errors());

    // длина проверяется после преобразования в Punycode
    let name = format!("ü{0}.{1}.{1}.{1}.aaaaa", "a".repeat(50), label_63);
    assert_eq!(uts46.name_to_ascii(&name).1.errors(), IdnaErrors::DOMAIN_NAME_TOO_LONG);
    assert!(!uts46.name_to_unicode(&name).1.has_errors());

    // для отдельной метки длина имени не проверяется
    assert_eq!(uts46.label_to_ascii(&label_64).1.errors(), IdnaErrors::LABEL_TOO_LONG);
}

#[test]
fn ace_labels()
{
    let uts46 = uts46(Uts46Options::DEFAULT);

    let (result, info) = uts46.name_to_unicode("xn--");
    assert_eq!(result, "xn--\u{FFFD}");
    assert!(info.errors().contains(IdnaErrors::INVALID_ACE_LABEL));

    invalid!(uts46, "xn--abc-.de", IdnaErrors::INVALID_ACE_LABEL);
    // декодируется в U+0080
    invalid!(uts46, "xn--a.de", IdnaErrors::INVALID_ACE_LABEL);
    invalid!(uts46, "xn--a-!.de", IdnaErrors::PUNYCODE);
    invalid!(uts46, "xn--ab-.de", IdnaErrors::INVALID_ACE_LABEL);

    let (result, info) = uts46.name_to_ascii("xn--bcher-2pa.de");
    assert_eq!(result, "xn--bcher-2pa\u{FFFD}.de");
    assert_eq!(info.errors(), IdnaErrors::INVALID_ACE_LABEL);
}

#[test]
fn disallowed()
{
    let default = uts46(Uts46Options::DEFAULT);
    let std3 = uts46(Uts46Options::USE_STD3_RULES);

    let (result, info) = default.name_to_unicode("a\u{80}b.de");
    assert_eq!(result, "a\u{FFFD}b.de");
    assert!(info.errors().contains(IdnaErrors::DISALLOWED));

    let (result, info) = std3.name_to_ascii("a_b.de");
    assert_eq!(result, "a\u{FFFD}b.de");
    assert!(info.errors().contains(IdnaErrors::DISALLOWED));

    assert!(!default.name_to_ascii("a≠b").1.has_errors());
    invalid!(std3, "a≠b", IdnaErrors::DISALLOWED);

    let (result, info) = default.name_to_unicode("\u{308}a.de");
    assert_eq!(result, "\u{FFFD}a.de");
    assert_eq!(info.errors(), IdnaErrors::LEADING_COMBINING_MARK);

    let (_, info) = default.label_to_ascii("a.b");
    assert!(info.errors().contains(IdnaErrors::LABEL_HAS_DOT));

    let (_, info) = default.label_to_unicode("ü.b");
    assert!(info.errors().contains(IdnaErrors::LABEL_HAS_DOT));
}

#[test]
fn bidi()
{
    let uts46 = uts46(Uts46Options::NONTRANSITIONAL);

    valid!(uts46, "\u{5D0}\u{5D1}.com", "xn--4dbc.com", "\u{5D0}\u{5D1}.com");
    valid!(uts46, "a.\u{5D0}", "a.xn--4db", "a.\u{5D0}");

    invalid!(uts46, "0a.\u{5D0}", IdnaErrors::BIDI);
    invalid!(uts46, "\u{5D0}.0a", IdnaErrors::BIDI);
    invalid!(uts46, "\u{5D0}0\u{660}", IdnaErrors::BIDI);
    invalid!(uts46, "a\u{5D0}", IdnaErrors::BIDI);

    // без проверки BiDi
    let transitional = Uts46::new(Uts46Options::DEFAULT).unwrap();
    assert!(!transitional.name_to_ascii("0a.\u{5D0}").1.has_errors());
}

#[test]
fn context()
{
    let contextj = uts46(Uts46Options::NONTRANSITIONAL);
    let contexto = uts46(Uts46Options::CHECK_CONTEXTO);

    invalid!(contextj, "a\u{200C}b", IdnaErrors::CONTEXTJ);
    invalid!(contextj, "a\u{200D}b", IdnaErrors::CONTEXTJ);

    assert!(!contexto.name_to_unicode("l\u{B7}l").1.has_errors());
    invalid!(contexto, "a\u{B7}b", IdnaErrors::CONTEXTO_PUNCTUATION);
    invalid!(contexto, "\u{30FB}", IdnaErrors::CONTEXTO_PUNCTUATION);
    assert!(!contexto.name_to_unicode("\u{30A2}\u{30FB}").1.has_errors());
    invalid!(contexto, "\u{660}\u{6F0}", IdnaErrors::CONTEXTO_DIGITS);
    assert!(!contexto.name_to_unicode("\u{660}\u{661}").1.has_errors());
}
