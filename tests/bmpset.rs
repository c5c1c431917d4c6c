use unicode_normalizing::{ComposingNormalizer, InversionList, Normalizer, SpanCondition};

/// множество кодпоинтов с ненулевым CCC
fn nonstarters() -> InversionList
{
    let nfc = ComposingNormalizer::new_nfc().unwrap();

    let codes = (0 .. 0x110000u32).filter(|c| char::from_u32(*c).map_or(false, |c| nfc.combining_class(c) != 0));

    InversionList::from_ranges(codes.map(|c| c ..= c)).unwrap()
}

/// BmpSet и двоичный поиск по инверсионному списку дают одинаковый результат для всех кодпоинтов
#[test]
fn bmpset_contains()
{
    let sets = [
        nonstarters(),
        InversionList::from_ranges([0x41 ..= 0x5A, 0x61 ..= 0x7A]).unwrap(),
        InversionList::from_ranges([0x80 ..= 0x7FF, 0xD800 ..= 0xDFFF, 0x10000 ..= 0x10FFFF]).unwrap(),
        InversionList::from_ranges([0xFF ..= 0x100, 0x7FF ..= 0x800, 0xFFF ..= 0x1000, 0xFFFF ..= 0x10000]).unwrap(),
        InversionList::from_ranges(core::iter::empty()).unwrap(),
        InversionList::from_ranges([0 ..= 0x10FFFF]).unwrap(),
    ];

    for (i, set) in sets.iter().enumerate() {
        let bmp_set = set.bmp_set();

        for c in 0 .. 0x110000 {
            assert_eq!(bmp_set.contains(c), set.contains(c), "set {}, U+{:04X}", i, c);
        }

        assert!(!bmp_set.contains(0x110000));
    }
}

#[test]
fn bmpset_span()
{
    let set = nonstarters();
    let bmp_set = set.bmp_set();

    let text = "a\u{301}\u{316}b\u{1D165}\u{1D16D}c";

    assert_eq!(bmp_set.span_str(text, SpanCondition::NotContained), 1);
    assert_eq!(bmp_set.span_str(&text[1 ..], SpanCondition::Contained), 4);
    assert_eq!(bmp_set.span_back_str(text, SpanCondition::NotContained), text.len() - 1);
    assert_eq!(bmp_set.span_back_str(&text[.. text.len() - 1], SpanCondition::Contained), 6);

    let utf16: Vec<u16> = text.encode_utf16().collect();

    assert_eq!(bmp_set.span(&utf16, 0, SpanCondition::NotContained), (1, 1));
    assert_eq!(bmp_set.span(&utf16, 1, SpanCondition::Contained), (3, 2));
    assert_eq!(bmp_set.span(&utf16, 4, SpanCondition::Contained), (8, 2));
    assert_eq!(bmp_set.span_back(&utf16, 8, SpanCondition::Contained), 4);
}

#[test]
fn small_set()
{
    let set = InversionList::try_from_vec(vec![0, 4, 0x110000]).unwrap();
    let bmp_set = set.bmp_set();

    assert!(bmp_set.contains(0));
    assert!(bmp_set.contains(3));
    assert!(!bmp_set.contains(4));
    assert!(!bmp_set.contains(0x10FFFF));
    assert!(!bmp_set.contains(u32::MAX));
}

/// отрезки, пройденные span, проходятся span_back обратно до той же позиции
#[test]
fn span_symmetry()
{
    let set = nonstarters();
    let bmp_set = set.bmp_set();

    let mut text: Vec<u16> = "ả\u{301}\u{316}x\u{1D165}\u{1D16D}\u{300}y".encode_utf16().collect();
    // одиночные суррогаты
    text.extend([0xDC00, 0xD800, 0x7A, 0xFF9E]);

    assert_eq!(bmp_set.span(&text, 0, SpanCondition::NotContained), (1, 1));
    assert_eq!(bmp_set.span(&text, 1, SpanCondition::Contained), (3, 2));
    assert_eq!(bmp_set.span(&text, 4, SpanCondition::Contained), (9, 3));
    // одиночные суррогаты считаются отдельными кодпоинтами
    let (limit, count) = bmp_set.span(&text, 9, SpanCondition::NotContained);
    assert!(limit >= 13);
    assert_eq!(count, limit - 9);

    // разбиение текста на максимальные отрезки с чередующимся условием
    let mut start = 0;
    let mut condition = SpanCondition::NotContained;
    let mut segments = 0;

    while start < text.len() {
        let (limit, count) = bmp_set.span(&text, start, condition);

        assert!(limit > start, "{} {:?}", start, condition);
        assert_eq!(bmp_set.span_back(&text, limit, condition), start, "{} {:?}", limit, condition);
        assert_eq!(count, char::decode_utf16(text[start .. limit].iter().copied()).count());

        // на границе отрезка условие меняется
        if limit < text.len() {
            assert_eq!(bmp_set.span(&text, limit, condition), (limit, 0));
        }

        start = limit;
        segments += 1;

        condition = match condition {
            SpanCondition::Contained => SpanCondition::NotContained,
            SpanCondition::NotContained => SpanCondition::Contained,
        };
    }

    assert!(segments >= 4);
}
