
pub(crate) const EMOJI_TEST: &str = include_str!("../../../tests/fixtures/emoji-test-sample.txt");
pub(crate) const ANNOTATIONS: &str = include_str!("../../../tests/fixtures/en-sample.xml");
