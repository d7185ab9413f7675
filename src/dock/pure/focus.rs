// Focus cycling across a slot's instances (no I/O)

use crate::compositor::LiveWindow;

/// Address to focus next: the instance after the focused one, wrapping
/// around, or the first instance when none of them has focus.
pub fn next_focus_address<'a>(instances: &'a [LiveWindow], focused: Option<&str>) -> Option<&'a str> {
    let first = instances.first()?;
    let current = focused.and_then(|addr| instances.iter().position(|w| w.address == addr));
    match current {
        Some(i) => Some(instances[(i + 1) % instances.len()].address.as_str()),
        None => Some(first.address.as_str()),
    }
}
