//! Punycode (RFC 3492)

use crate::error::PunycodeError;

const BASE: u32 = 36;
const TMIN: u32 = 1;
const TMAX: u32 = 26;
const SKEW: u32 = 38;
const DAMP: u32 = 700;
const INITIAL_BIAS: u32 = 72;
const INITIAL_N: u32 = 0x80;
const DELIMITER: char = '-';

#[inline(always)]
fn threshold(k: u32, bias: u32) -> u32
{
    match k {
        k if k <= bias => TMIN,
        k if k >= bias + TMAX => TMAX,
        k => k - bias,
    }
}

fn adapt(delta: u32, points: u32, first_time: bool) -> u32
{
    let mut delta = match first_time {
        true => delta / DAMP,
        false => delta / 2,
    };

    delta += delta / points;

    let mut k = 0;

    while delta > ((BASE - TMIN) * TMAX) / 2 {
        delta /= BASE - TMIN;
        k += BASE;
    }

    k + (BASE - TMIN + 1) * delta / (delta + SKEW)
}

#[inline(always)]
fn encode_digit(digit: u32) -> char
{
    match digit {
        0 ..= 25 => (b'a' + digit as u8) as char,
        _ => (b'0' + (digit - 26) as u8) as char,
    }
}

#[inline(always)]
fn decode_digit(byte: u8) -> Option<u32>
{
    match byte {
        b'0' ..= b'9' => Some((byte - b'0') as u32 + 26),
        b'A' ..= b'Z' => Some((byte - b'A') as u32),
        b'a' ..= b'z' => Some((byte - b'a') as u32),
        _ => None,
    }
}

/// закодировать строку в Punycode (без префикса "xn--")
pub fn encode(input: &str) -> Result<String, PunycodeError>
{
    let codes: Vec<u32> = input.chars().map(u32::from).collect();

    let mut output: String = input.chars().filter(char::is_ascii).collect();

    let basic = output.len() as u32;
    let total = codes.len() as u32;
    let mut handled = basic;

    if basic > 0 {
        output.push(DELIMITER);
    }

    let mut n = INITIAL_N;
    let mut delta: u32 = 0;
    let mut bias = INITIAL_BIAS;

    while handled < total {
        // минимальный ещё не обработанный кодпоинт
        let m = codes
            .iter()
            .copied()
            .filter(|c| *c >= n)
            .min()
            .ok_or(PunycodeError::BadInput)?;

        delta = (m - n)
            .checked_mul(handled + 1)
            .and_then(|d| delta.checked_add(d))
            .ok_or(PunycodeError::Overflow)?;

        n = m;

        for &code in &codes {
            if code < n {
                delta = delta.checked_add(1).ok_or(PunycodeError::Overflow)?;
            }

            if code == n {
                let mut q = delta;
                let mut k = BASE;

                loop {
                    let t = threshold(k, bias);

                    if q < t {
                        break;
                    }

                    output.push(encode_digit(t + (q - t) % (BASE - t)));
                    q = (q - t) / (BASE - t);
                    k += BASE;
                }

                output.push(encode_digit(q));

                bias = adapt(delta, handled + 1, handled == basic);
                delta = 0;
                handled += 1;
            }
        }

        delta = delta.checked_add(1).ok_or(PunycodeError::Overflow)?;
        n = n.checked_add(1).ok_or(PunycodeError::Overflow)?;
    }

    Ok(output)
}

/// декодировать строку Punycode (без префикса "xn--")
pub fn decode(input: &str) -> Result<String, PunycodeError>
{
    if !input.is_ascii() {
        return Err(PunycodeError::BadInput);
    }

    let (basic, extended) = match input.rfind(DELIMITER) {
        Some(position) => (&input[.. position], &input[position + 1 ..]),
        None => ("", input),
    };

    let mut output: Vec<char> = basic.chars().collect();

    let mut n = INITIAL_N;
    let mut i: u32 = 0;
    let mut bias = INITIAL_BIAS;

    let mut bytes = extended.bytes().peekable();

    while bytes.peek().is_some() {
        let old_i = i;
        let mut w: u32 = 1;
        let mut k = BASE;

        loop {
            let digit = bytes
                .next()
                .and_then(decode_digit)
                .ok_or(PunycodeError::BadInput)?;

            i = digit
                .checked_mul(w)
                .and_then(|d| i.checked_add(d))
                .ok_or(PunycodeError::Overflow)?;

            let t = threshold(k, bias);

            if digit < t {
                break;
            }

            w = w.checked_mul(BASE - t).ok_or(PunycodeError::Overflow)?;
            k += BASE;
        }

        let length = output.len() as u32 + 1;

        bias = adapt(i - old_i, length, old_i == 0);
        n = n.checked_add(i / length).ok_or(PunycodeError::Overflow)?;
        i %= length;

        // базовые кодпоинты не кодируются
        if n < INITIAL_N {
            return Err(PunycodeError::BadInput);
        }

        let c = char::from_u32(n).ok_or(PunycodeError::BadInput)?;

        output.insert(i as usize, c);
        i += 1;
    }

    Ok(output.into_iter().collect())
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn samples()
    {
        assert_eq!(encode("bücher").unwrap(), "bcher-kva");
        assert_eq!(encode("München").unwrap(), "Mnchen-3ya");
        assert_eq!(encode("правда").unwrap(), "80aafi6cg");
        assert_eq!(encode("ü").unwrap(), "tda");
        assert_eq!(encode("α").unwrap(), "mxa");
        assert_eq!(encode("abc").unwrap(), "abc-");

        assert_eq!(decode("bcher-kva").unwrap(), "bücher");
        assert_eq!(decode("Mnchen-3ya").unwrap(), "München");
        assert_eq!(decode("80aafi6cg").unwrap(), "правда");
        assert_eq!(decode("tda").unwrap(), "ü");
    }

    #[test]
    fn rfc_samples()
    {
        // RFC 3492, 7.1 (A) арабский (египетский)
        assert_eq!(
            decode("egbpdaj6bu4bxfgehfvwxn").unwrap(),
            "\u{644}\u{64A}\u{647}\u{645}\u{627}\u{628}\u{62A}\u{643}\u{644}\u{645}\u{648}\u{634}\u{639}\u{631}\u{628}\u{64A}\u{61F}"
        );
        // (B) китайский (упрощённый)
        assert_eq!(encode("\u{4ED6}\u{4EEC}\u{4E3A}\u{4EC0}\u{4E48}\u{4E0D}\u{8BF4}\u{4E2D}\u{6587}").unwrap(), "ihqwcrb4cv8a8dqg056pqjye");
    }

    #[test]
    fn bad_input()
    {
        assert_eq!(decode("ü"), Err(PunycodeError::BadInput));
        assert_eq!(decode("a-!"), Err(PunycodeError::BadInput));
        // цифра без продолжения
        assert_eq!(decode("99"), Err(PunycodeError::BadInput));
        assert_eq!(decode("99999999999999999999"), Err(PunycodeError::Overflow));
    }
}
