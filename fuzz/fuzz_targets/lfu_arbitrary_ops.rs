#![no_main]

use libfuzzer_sys::fuzz_target;
use lfukit::policy::lfu::LfuCache;

// Fuzz arbitrary get/put sequences on LfuCache
//
// First byte picks the capacity; each following pair is (op, key).
fuzz_target!(|data: &[u8]| {
    let Some((&cap_byte, rest)) = data.split_first() else {
        return;
    };

    let capacity = usize::from(cap_byte % 32) + 1;
    let mut cache: LfuCache<u8, u32> = LfuCache::new(capacity);

    for (step, pair) in rest.chunks_exact(2).enumerate() {
        let op = pair[0] % 6;
        let key = pair[1] % 64;
        let value = step as u32;

        match op {
            0 | 1 => {
                // put
                let was_present = cache.contains(&key);
                let old_freq = cache.frequency(&key);
                let full = cache.len() == capacity;
                let victim = cache.peek_lfu().map(|(k, _)| *k);

                let previous = cache.put(key, value);

                assert_eq!(previous.is_some(), was_present);
                assert_eq!(cache.peek(&key), Some(&value));
                if was_present {
                    assert_eq!(cache.frequency(&key), old_freq.map(|f| f + 1));
                } else {
                    assert_eq!(cache.frequency(&key), Some(1));
                    if full {
                        if let Some(victim) = victim {
                            assert!(!cache.contains(&victim));
                        }
                    }
                }
            }
            2 | 3 => {
                // get
                let old_len = cache.len();
                let old_freq = cache.frequency(&key);
                let hit = cache.get(&key);

                assert_eq!(hit.is_some(), old_freq.is_some());
                assert_eq!(cache.len(), old_len);
                assert_eq!(cache.frequency(&key), old_freq.map(|f| f + 1));
            }
            4 => {
                // peek / contains must not count
                let before: Vec<_> = cache.iter().map(|(k, _, f)| (*k, f)).collect();
                let _ = cache.peek(&key);
                let _ = cache.contains(&key);
                let _ = cache.peek_lfu();
                let after: Vec<_> = cache.iter().map(|(k, _, f)| (*k, f)).collect();
                assert_eq!(before, after);
            }
            5 => {
                // full structural check
                assert!(cache.check_invariants().is_ok());
            }
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
    }

    assert!(cache.check_invariants().is_ok());
});
