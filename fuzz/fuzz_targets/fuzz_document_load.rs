#![no_main]

use kinfolk_store::Family;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Loading is best-effort: arbitrary input may be rejected but must never panic.
    let Ok(family) = Family::from_json(text) else {
        return;
    };
    assert!(family.contains(family.root_id()), "loaded family lost its root");

    let saved = family.to_json().expect("a loaded family serializes");
    let reloaded = Family::from_json(&saved).expect("saved output loads");
    assert_eq!(reloaded.root_id(), family.root_id());
    assert_eq!(reloaded.title(), family.title());
    assert_eq!(reloaded.len(), family.len());
    for person in family.members() {
        let other = reloaded.member(&person.id).expect("member survives a round trip");
        assert!(other.same_record(person), "member {} changed", person.id);
    }
});
