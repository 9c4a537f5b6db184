/// Compute effective limit with precedence: global flag -> configured default.
///
/// The service clamps whatever comes out of here to `general.max_limit`.
#[must_use]
pub fn effective_limit(global: Option<u32>, configured_default: u32) -> u32 {
    global.filter(|limit| *limit > 0).unwrap_or(configured_default)
}
