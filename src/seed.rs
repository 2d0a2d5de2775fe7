//! Reversible room share-code scheme.
//! Code format: <MODE>-<WORD><NN>, e.g., CL-LANTERN42, HK-ATTIC07

use crate::modes::GameMode;

fn fnv1a64(bytes: &[u8]) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0100_0000_01b3;
    let mut hash = FNV_OFFSET;
    for b in bytes {
        hash = (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME);
    }
    hash
}

fn sanitize_word(word: &str) -> String {
    word.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

// Word list for share codes
pub const WORD_LIST: [&str; 48] = [
    "LANTERN", "ARCHIVE", "DRAWER", "CIPHER", "TUMBLER", "GOPHER", "ITASCA", "MESABI", "BUNYAN",
    "VOYAGR", "BEAVER", "PELTS", "MILLER", "FLOUR", "NORSTAR", "KEYHOLE", "DEWDROP", "CARBON",
    "PAPERS", "FOLDER", "SATCHL", "TYPIST", "RIBBON", "INKPOT", "LEDGER", "VAULT", "BRASS",
    "HINGE", "PIVOT", "CANDLE", "SHADOW", "ATTIC", "CELLAR", "MARBLE", "GRANITE", "PRAIRIE",
    "WINTER", "BLIZRD", "LOON", "WALLEYE", "HOTDISH", "LEFSE", "PORTAGE", "TIMBER", "SAWDUST",
    "COMPASS", "SEXTANT", "MERIDN",
];

#[inline]
fn pack(word_index: u16, nn: u8) -> u16 {
    word_index & 0x01FF | ((u16::from(nn) & 0x7F) << 9)
}

#[inline]
fn unpack(packed: u16) -> (u16, u8) {
    (packed & 0x01FF, ((packed >> 9) & 0x7F) as u8)
}

const fn mode_prefix(mode: GameMode) -> &'static str {
    match mode {
        GameMode::Classic => "CL",
        GameMode::AccessCards => "AC",
        GameMode::Trail => "TR",
        GameMode::HiddenKey => "HK",
        GameMode::CodeDoor => "CD",
    }
}

fn mode_from_prefix(prefix: &str) -> Option<GameMode> {
    match prefix.to_ascii_uppercase().as_str() {
        "CL" => Some(GameMode::Classic),
        "AC" => Some(GameMode::AccessCards),
        "TR" => Some(GameMode::Trail),
        "HK" => Some(GameMode::HiddenKey),
        "CD" => Some(GameMode::CodeDoor),
        _ => None,
    }
}

fn compose_seed(mode: GameMode, word_index: u16, nn: u8) -> u64 {
    let packed = pack(word_index, nn);
    // Domain-separated FNV input
    let prefix = mode_prefix(mode).as_bytes();
    let mut buf = [0u8; 11];
    buf[..6].copy_from_slice(b"NSTAR-");
    buf[6] = prefix[0];
    buf[7] = prefix[1];
    buf[8] = (packed & 0xFF) as u8;
    buf[9] = (packed >> 8) as u8;
    buf[10] = 0xA5;
    let h = fnv1a64(&buf);
    (h & 0xFFFF_FFFF_FFFF_0000) | u64::from(packed)
}

#[must_use]
pub fn encode_friendly(mode: GameMode, seed: u64) -> String {
    let packed = (seed & 0xFFFF) as u16;
    let (wi, mut nn) = unpack(packed);
    let word = WORD_LIST.get(wi as usize).copied().unwrap_or("LANTERN");
    if nn > 99 {
        nn %= 100;
    }
    format!("{}-{word}{nn:02}", mode_prefix(mode))
}

#[must_use]
pub fn decode_to_seed(code: &str) -> Option<(GameMode, u64)> {
    let s = code.trim();
    let (m, rest) = s.split_once('-')?;
    let mode = mode_from_prefix(m)?;
    if rest.len() < 3 {
        return None;
    }
    let (word_part, nn_part) = rest.split_at(rest.len() - 2);
    let nn: u8 = nn_part.parse().ok()?;
    let word = sanitize_word(word_part);
    let idx = WORD_LIST.iter().position(|w| sanitize_word(w) == word)?;
    let wi = u16::try_from(idx).ok()?;
    let seed = compose_seed(mode, wi, nn);
    Some((mode, seed))
}

#[must_use]
pub fn generate_code_from_entropy(mode: GameMode, entropy: u64) -> String {
    let wi = u16::try_from(entropy % WORD_LIST.len() as u64).unwrap_or(0);
    let nn = ((entropy >> 17) % 100) as u8;
    let seed = compose_seed(mode, wi, nn);
    encode_friendly(mode, seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrips_code() {
        let seed = 0xDEAD_BEEF_CAFE_BABE;
        let code = encode_friendly(GameMode::HiddenKey, seed);
        let (mode, new_seed) = decode_to_seed(&code).unwrap();
        assert_eq!(mode, GameMode::HiddenKey);
        assert_eq!(encode_friendly(GameMode::HiddenKey, new_seed), code);
    }

    #[test]
    fn cl_lantern_42_stable() {
        let (mode, seed) = decode_to_seed("CL-LANTERN42").unwrap();
        assert_eq!(mode, GameMode::Classic);
        assert_eq!(encode_friendly(GameMode::Classic, seed), "CL-LANTERN42");
    }

    #[test]
    fn mode_prefixes_decode_to_distinct_seeds() {
        let (classic_mode, classic_seed) = decode_to_seed("CL-ATTIC07").unwrap();
        let (trail_mode, trail_seed) = decode_to_seed("TR-ATTIC07").unwrap();
        assert_eq!(classic_mode, GameMode::Classic);
        assert_eq!(trail_mode, GameMode::Trail);
        assert_ne!(classic_seed, trail_seed);
        assert!(decode_to_seed("ZZ-ATTIC07").is_none());
        assert!(decode_to_seed("CL-NOSUCH42").is_none());
    }

    #[test]
    fn entropy_codes_are_decodable() {
        for entropy in [0u64, 1, 0xFFFF, 0x1234_5678_9ABC] {
            let code = generate_code_from_entropy(GameMode::AccessCards, entropy);
            let (mode, _seed) = decode_to_seed(&code).unwrap();
            assert_eq!(mode, GameMode::AccessCards);
        }
    }
}
