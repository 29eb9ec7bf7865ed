use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};

const ID_PREFIX: &str = "n_";
const ID_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

static COUNTER: AtomicUsize = AtomicUsize::new(1);

/// New node id in the `n_xxxxxxxxx` shape (9 base-36 characters).
pub(crate) fn generate_node_id() -> String {
    let mut bytes = [0u8; ID_LEN];
    if getrandom::getrandom(&mut bytes).is_err() {
        // No entropy source: derive from a process-wide counter instead.
        let mut hasher = DefaultHasher::new();
        COUNTER.fetch_add(1, Ordering::SeqCst).hash(&mut hasher);
        let seed = hasher.finish().to_le_bytes();
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = seed[i % seed.len()].wrapping_add(i as u8);
        }
    }

    let suffix: String = bytes
        .iter()
        .map(|b| BASE36[(*b as usize) % BASE36.len()] as char)
        .collect();
    format!("{ID_PREFIX}{suffix}")
}

pub(crate) fn today_yyyymmdd_local() -> String {
    // Use system local timezone (browser runtime).
    let d = js_sys::Date::new_0();
    let y = d.get_full_year();
    let m = d.get_month() + 1;
    let day = d.get_date();
    format!("{:04}{:02}{:02}", y, m, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_node_id_shape() {
        let id = generate_node_id();
        assert!(id.starts_with("n_"));
        assert_eq!(id.len(), 2 + 9);
        assert!(id[2..].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_generate_node_id_is_unique_enough() {
        let ids: HashSet<String> = (0..500).map(|_| generate_node_id()).collect();
        assert_eq!(ids.len(), 500);
    }
}
