#![no_main]

use libfuzzer_sys::fuzz_target;
use lfukit::ds::FrequencyList;

// Fuzz arbitrary operation sequences on FrequencyList
//
// Tests random sequences of insert_by_frequency, increment, pop_front,
// remove and clear, validating ordering after every step.
fuzz_target!(|data: &[u8]| {
    let mut list: FrequencyList<u32> = FrequencyList::new();
    let mut ids = Vec::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 5;
        let arg = pair[1];

        match op {
            0 => {
                // insert_by_frequency
                let frequency = u64::from(arg % 8) + 1;
                let old_len = list.len();
                let id = list.insert_by_frequency(u32::from(arg), frequency);
                ids.push(id);

                assert_eq!(list.len(), old_len + 1);
                assert_eq!(list.frequency(id), Some(frequency));
                // nothing after the new node may share its frequency
                let after: Vec<u64> = list
                    .iter_ids()
                    .skip_while(|other| *other != id)
                    .skip(1)
                    .filter_map(|other| list.frequency(other))
                    .collect();
                assert!(after.iter().all(|f| *f > frequency));
            }
            1 => {
                // increment
                if ids.is_empty() {
                    continue;
                }
                let id = ids[usize::from(arg) % ids.len()];
                let before = list.frequency(id);
                let after = list.increment(id);
                assert_eq!(after, before.map(|f| f + 1));
            }
            2 => {
                // pop_front
                let old_len = list.len();
                let min = list.iter().map(|(_, f)| f).min();
                match list.pop_front() {
                    Some((_, frequency)) => {
                        assert_eq!(Some(frequency), min);
                        assert_eq!(list.len(), old_len - 1);
                    }
                    None => assert_eq!(old_len, 0),
                }
            }
            3 => {
                // remove
                if ids.is_empty() {
                    continue;
                }
                let id = ids.swap_remove(usize::from(arg) % ids.len());
                let present = list.contains(id);
                assert_eq!(list.remove(id).is_some(), present);
                assert!(!list.contains(id));
            }
            4 => {
                // clear
                if arg == 0 {
                    list.clear();
                    ids.clear();
                    assert!(list.is_empty());
                }
            }
            _ => unreachable!(),
        }

        assert!(list.check_invariants().is_ok());
    }
});
