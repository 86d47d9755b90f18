#![no_main]
use json_assertions::{excerpt, resolve, JsonTester};
use libfuzzer_sys::fuzz_target;

// Input layout: `<path>\n<json document>`.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Some((path, document)) = text.split_once('\n') else {
        return;
    };
    let Ok(document) = serde_json::from_str::<serde_json::Value>(document) else {
        return;
    };
    let first = resolve(&document, path).cloned();
    assert_eq!(first, resolve(&document, path).cloned());
    let _ = excerpt(&document, path);

    let reporter = |_: bool, _: String| {};
    let tester = JsonTester::new(&document, &reporter);
    let has = tester.must_have(path).is_pass();
    let missing = tester.must_not_have(path).is_pass();
    assert!(!(has && missing));
});
