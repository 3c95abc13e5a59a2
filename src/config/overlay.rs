/// Layers a higher-precedence source on top of a lower one.
///
/// Values present in `overrides` win; everything else is kept from `self`.
pub trait Overlay {
    fn overlay(self, overrides: Self) -> Self;
}
