use std::rc::Rc;

use proptest::prelude::*;

use galactic_invasion::entities::Combatant;
use galactic_invasion::sprite::{Mask, Sprite, Tint};

fn ship(cooldown_period: u32) -> Combatant {
    let sprite = Rc::new(Sprite::from_art(&["###"], 2, Tint::Yellow).unwrap());
    let laser = Rc::new(Sprite::from_art(&["#"], 1, Tint::Yellow).unwrap());
    Combatant::new(0, 0, 100, cooldown_period, sprite, laser)
}

fn art() -> impl Strategy<Value = Vec<String>> {
    (1usize..6, 1usize..6).prop_flat_map(|(w, h)| {
        prop::collection::vec(
            prop::collection::vec(prop::bool::ANY, w)
                .prop_map(|row| {
                    row.into_iter()
                        .map(|b| if b { '#' } else { '.' })
                        .collect::<String>()
                }),
            h,
        )
    })
}

fn mask(rows: &[String], scale: u32) -> Mask {
    let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    Mask::from_art(&refs, scale).unwrap()
}

proptest! {
    #[test]
    fn shots_land_exactly_one_period_apart(period in 1u32..80, ticks in 1usize..400) {
        let mut ship = ship(period);
        let mut shot_ticks = Vec::new();
        for tick in 0..ticks {
            if ship.fire() {
                shot_ticks.push(tick);
            }
            ship.advance_cooldown();
            prop_assert!(ship.cooldown_counter <= period);
        }
        let expected: Vec<usize> = (0..ticks).step_by(period as usize).collect();
        prop_assert_eq!(shot_ticks, expected);
    }

    #[test]
    fn overlap_is_symmetric(
        a in art(),
        b in art(),
        scale in 1u32..4,
        dx in -20i32..20,
        dy in -20i32..20,
    ) {
        let ma = mask(&a, scale);
        let mb = mask(&b, scale);
        prop_assert_eq!(ma.overlaps(&mb, (dx, dy)), mb.overlaps(&ma, (-dx, -dy)));
    }

    #[test]
    fn overlap_matches_pixel_scan(
        a in art(),
        b in art(),
        dx in -8i32..8,
        dy in -8i32..8,
    ) {
        let ma = mask(&a, 1);
        let mb = mask(&b, 1);
        let mut expected = false;
        for y in 0..ma.height() as i32 {
            for x in 0..ma.width() as i32 {
                if ma.get(x, y) && mb.get(x - dx, y - dy) {
                    expected = true;
                }
            }
        }
        prop_assert_eq!(ma.overlaps(&mb, (dx, dy)), expected);
    }
}
