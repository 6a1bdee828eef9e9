// Team cross-highlighting.
//
// Faded colors are always derived from the original arrays kept in the chart
// state, never from whatever is currently displayed, so repeated hovers
// cannot compound the fade.

use hitboard_core::colors::Rgba;

/// Opacity applied to bars that do not belong to the hovered team.
pub const FADED_ALPHA: f32 = 0.2;

/// Colors with every bar of `team` kept at its original color and every
/// other bar faded to [`FADED_ALPHA`].
pub fn highlight_team<S: AsRef<str>>(original: &[Rgba], teams: &[S], team: &str) -> Vec<Rgba> {
    original
        .iter()
        .zip(teams)
        .map(|(color, bar_team)| {
            if bar_team.as_ref() == team {
                *color
            } else {
                color.with_alpha(FADED_ALPHA)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hitboard_core::colors::Rgb;

    #[test]
    fn same_team_keeps_original_others_fade() {
        let original = vec![
            Rgb::new(10, 20, 30).opaque(),
            Rgb::new(40, 50, 60).opaque(),
            Rgb::new(70, 80, 90).opaque(),
        ];
        let teams = ["Cubs", "Sox", "Cubs"];
        let out = highlight_team(&original, &teams, "Cubs");
        assert_eq!(out[0], original[0]);
        assert_eq!(out[2], original[2]);
        assert_eq!(out[1].rgb, original[1].rgb);
        assert_eq!(out[1].alpha, FADED_ALPHA);
    }

    #[test]
    fn fading_from_originals_does_not_compound() {
        let original = vec![Rgb::new(1, 1, 1).opaque(), Rgb::new(2, 2, 2).opaque()];
        let teams = ["A", "B"];
        let first = highlight_team(&original, &teams, "A");
        let second = highlight_team(&original, &teams, "A");
        assert_eq!(first, second);
        assert_eq!(second[1].alpha, FADED_ALPHA);
    }

    #[test]
    fn unknown_team_fades_everything() {
        let original = vec![Rgb::new(1, 1, 1).opaque(); 3];
        let out = highlight_team(&original, &["A", "B", "C"], "Z");
        assert!(out.iter().all(|c| c.alpha == FADED_ALPHA));
    }
}
