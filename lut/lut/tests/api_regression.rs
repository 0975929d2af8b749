//! API Regression Tests for the LUT Crate Ecosystem
//!
//! These tests pin the public API and the observable output of the lut-*
//! crates. They are organized in 4 tiers of increasing scope:
//!
//! - Tier 1: Foundation (lut-types)
//! - Tier 2: Core Operations (mixing, enumeration, selection)
//! - Tier 3: Pipeline (the eight-colour table end to end)
//! - Tier 4: I/O and Lookup (lut-io, `ColorLut`)
//!
//! A failure here after an API change means either a breaking change or a
//! change in the published table, and both need a version bump.

// Allow test-specific patterns
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::cast_possible_truncation)]

use approx::assert_relative_eq;
use lut::{generate, io, prelude::*, types};

/// The reference table, generated once per test that needs it.
fn reference() -> LutOutput {
    generate_lut(&LutParams::eight_color()).unwrap()
}

/// 64-bit FNV-1a, used to pin table bytes.
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
    })
}

// =============================================================================
// TIER 1: Foundation - Colours, Materials, Stacks
// =============================================================================

mod tier1_foundation {
    use super::*;

    #[test]
    fn eight_color_material_table() {
        let table = MaterialTable::eight_color();
        assert_eq!(table.len(), 8);

        let black = table.get(4).unwrap();
        assert_eq!(black.color, Rgb::BLACK);
        assert_relative_eq!(black.transmission_distance, 0.6);
        assert_eq!(table.find_by_name("black"), Some(4));

        let white = table.get(0).unwrap();
        assert_eq!(white.color, Rgb::WHITE);
    }

    #[test]
    fn alpha_is_bounded() {
        for (_, material) in MaterialTable::eight_color().iter() {
            for height in [0.0, 0.01, 0.08, 0.2, 1.0, 10.0] {
                let alpha = material.alpha(height);
                assert!((0.0..=1.0).contains(&alpha), "{} at {height}", material.name);
            }
        }
        assert_relative_eq!(types::layer_alpha(0.0, 0.08), 1.0);
        assert_relative_eq!(types::layer_alpha(-2.0, 0.08), 1.0);
    }

    #[test]
    fn rgb_truncates() {
        assert_eq!(Rgb::truncate([254.999, 0.5, 127.9]), Rgb::new(254, 0, 127));
        assert_relative_eq!(Rgb::BLACK.distance(Rgb::new(3, 4, 0)), 5.0);
    }

    #[test]
    fn stack_table_shape() {
        let table = StackTable::from_raw(5, vec![0; 15]).unwrap();
        assert_eq!(table.shape(), [3, 5]);
        assert!(StackTable::from_raw(5, vec![0; 14]).is_err());
        assert!(table.validate_ids(1).is_ok());
    }
}

// =============================================================================
// TIER 2: Core Operations - Mixing, Enumeration, Selection
// =============================================================================

mod tier2_core {
    use super::*;

    #[test]
    fn black_saturates_in_one_layer() {
        let mixer = Mixer::new(&LutParams::eight_color());
        assert_relative_eq!(mixer.alpha(4).unwrap(), 1.0);
        assert_eq!(mixer.mix(&Stack::uniform(4, 5)), Rgb::BLACK);
        assert_eq!(mixer.mix(&Stack::new(vec![0, 0, 0, 0, 4])), Rgb::BLACK);
    }

    #[test]
    fn mixed_colours_are_pinned() {
        let mixer = Mixer::new(&LutParams::eight_color());
        let seeds = [
            Rgb::new(255, 255, 255),
            Rgb::new(69, 167, 225),
            Rgb::new(240, 54, 164),
            Rgb::new(249, 246, 146),
            Rgb::new(0, 0, 0),
            Rgb::new(213, 114, 104),
            Rgb::new(38, 66, 150),
            Rgb::new(19, 180, 80),
        ];
        for (id, expected) in seeds.into_iter().enumerate() {
            assert_eq!(mixer.mix(&Stack::uniform(id as u8, 5)), expected, "material {id}");
        }

        let cyan = mixer.mix_exact(&Stack::uniform(1, 5));
        assert_relative_eq!(cyan[0], 69.665_663_782_947_55, epsilon = 1e-9);
        assert_relative_eq!(cyan[1], 167.057_040_461_712_35, epsilon = 1e-9);
        assert_relative_eq!(cyan[2], 225.201_145_941_571_9, epsilon = 1e-9);

        let blend = Stack::new(vec![3, 1, 6, 2, 5]);
        assert_eq!(mixer.mix(&blend), Rgb::new(165, 103, 149));
        assert_eq!(mixer.mix(&Stack::new(vec![4, 0, 0, 0, 0])), Rgb::new(128, 128, 128));
    }

    #[test]
    fn mix_is_deterministic() {
        let mixer = Mixer::new(&LutParams::eight_color());
        let stack = Stack::new(vec![1, 2, 3, 5, 6]);
        let first = mixer.mix(&stack);
        for _ in 0..10 {
            assert_eq!(mixer.mix(&stack), first);
        }
    }

    #[test]
    fn enumeration_order() {
        let space = generate::StackSpace::new(8, 5).unwrap();
        assert_eq!(space.len(), 32_768);

        let mut iter = space.iter();
        assert_eq!(iter.next().unwrap().1.layers(), &[0, 0, 0, 0, 0]);
        assert_eq!(iter.next().unwrap().1.layers(), &[0, 0, 0, 0, 1]);
        assert_eq!(space.stack_at(8).unwrap().layers(), &[0, 0, 0, 1, 0]);
        assert_eq!(space.stack_at(32_767).unwrap().layers(), &[7, 7, 7, 7, 7]);
        assert!(space.stack_at(32_768).is_none());
    }

    #[test]
    fn zero_threshold_is_enumeration_order() {
        let params = LutParams::eight_color()
            .with_layer_count(2)
            .with_target_count(20)
            .with_distance_threshold(0.0);
        let output = generate_lut(&params).unwrap();

        let seeds: Vec<u8> = (0..8).collect();
        let rest: Vec<Vec<u8>> = output
            .selection
            .stacks()
            .skip(8)
            .map(|s| s.layers().to_vec())
            .collect();
        for (i, id) in seeds.iter().enumerate() {
            assert_eq!(output.table.row(i).unwrap(), &[*id, *id]);
        }
        // [0, 0] is a seed, so the threshold phase starts at [0, 1]
        assert_eq!(rest[0], vec![0, 1]);
        assert_eq!(rest[6], vec![0, 7]);
        assert_eq!(rest[7], vec![1, 0]);
        assert_eq!(rest.len(), 12);
    }

    #[test]
    fn invalid_configurations() {
        assert!(generate_lut(&LutParams::eight_color().with_layer_count(0)).is_err());
        assert!(generate_lut(&LutParams::eight_color().with_target_count(0)).is_err());
        assert!(generate_lut(&LutParams::eight_color().with_distance_threshold(-1.0)).is_err());

        let strict = LutParams::eight_color()
            .with_layer_count(2)
            .with_target_count(65)
            .with_padding(PaddingPolicy::Reject);
        assert!(matches!(
            generate_lut(&strict),
            Err(generate::LutError::TargetExceedsStackSpace {
                target: 65,
                space: 64
            })
        ));
    }
}

// =============================================================================
// TIER 3: Pipeline - The Eight-Colour Table
// =============================================================================

mod tier3_pipeline {
    use super::*;
    use generate::SelectionPhase;

    #[test]
    fn reference_shape_and_ids() {
        let output = reference();
        assert_eq!(output.table.shape(), [2738, 5]);
        assert!(output.table.as_bytes().iter().all(|&id| id <= 7));
        assert_eq!(output.diagnostics.rows, 2738);
        assert_eq!(output.diagnostics.candidates, 32_768);
        assert_eq!(output.diagnostics.padding, 0);
    }

    #[test]
    fn seeds_lead_in_material_order() {
        let output = reference();
        let mixer = Mixer::new(&LutParams::eight_color());
        for id in 0..8u8 {
            let entry = &output.selection.entries[usize::from(id)];
            assert_eq!(entry.phase, SelectionPhase::Seed);
            assert_eq!(entry.stack, Stack::uniform(id, 5));
            assert_eq!(entry.color, mixer.mix(&entry.stack));
        }
        assert_eq!(output.diagnostics.seeds, 8);
    }

    #[test]
    fn stacks_are_distinct() {
        let output = reference();
        let mut rows: Vec<&[u8]> = output.table.rows().collect();
        rows.sort_unstable();
        rows.dedup();
        assert_eq!(rows.len(), 2738);
    }

    #[test]
    fn threshold_phase_is_separated() {
        let output = reference();
        let accepted: Vec<Rgb> = output
            .selection
            .entries
            .iter()
            .filter(|e| e.phase == SelectionPhase::Threshold)
            .map(|e| e.color)
            .collect();
        assert!(!accepted.is_empty());
        for (i, a) in accepted.iter().enumerate() {
            for b in &accepted[i + 1..] {
                assert!(a.distance(*b) >= 8.0, "{a} and {b} too close");
            }
        }
    }

    /// The published eight-colour table, byte for byte.
    #[test]
    fn reference_table_is_pinned() {
        let output = reference();
        assert_eq!(fnv1a(output.table.as_bytes()), 0xde2f_4a4c_4b51_346c);

        let rows: [(usize, [u8; 5], Rgb); 8] = [
            (0, [0, 0, 0, 0, 0], Rgb::new(255, 255, 255)),
            (7, [7, 7, 7, 7, 7], Rgb::new(19, 180, 80)),
            (8, [0, 0, 0, 0, 1], Rgb::new(196, 227, 245)),
            (11, [0, 0, 0, 0, 5], Rgb::new(242, 213, 210)),
            (100, [0, 0, 1, 7, 6], Rgb::new(80, 148, 160)),
            (1000, [0, 4, 7, 0, 2], Rgb::new(92, 72, 83)),
            (2000, [2, 3, 5, 7, 3], Rgb::new(156, 177, 114)),
            (2737, [4, 3, 3, 1, 5], Rgb::new(76, 70, 51)),
        ];
        for (row, stack, color) in rows {
            assert_eq!(output.table.row(row).unwrap(), &stack, "row {row}");
            assert_eq!(output.selection.entries[row].color, color, "row {row}");
        }

        assert_eq!(output.diagnostics.threshold, 2730);
        assert_eq!(output.diagnostics.fill, 0);
        let black = output.diagnostics.black.unwrap();
        assert_eq!((black.containing, black.top_layer), (680, 1));
        let red = output.diagnostics.red.unwrap();
        assert_relative_eq!(red.mean, 349_046.0 / 2738.0);
    }

    #[test]
    fn padding_repeats_default_stack() {
        let params = LutParams::eight_color()
            .with_layer_count(2)
            .with_target_count(70);
        let output = generate_lut(&params).unwrap();
        assert_eq!(output.table.shape(), [70, 2]);
        assert_eq!(output.diagnostics.padding, 6);
        for row in 64..70 {
            assert_eq!(output.table.row(row).unwrap(), &[0, 0]);
        }
        assert!(output.selection.is_padded());
    }

    #[test]
    fn diagnostics_report() {
        let output = reference();
        let black = output.diagnostics.black.unwrap();
        assert_eq!(black.id, 4);
        assert!(black.top_layer <= black.containing);
        assert!(black.containing <= 2738);

        let red = output.diagnostics.red.unwrap();
        assert_relative_eq!(red.min, 0.0);
        assert_relative_eq!(red.max, 255.0);

        let report = output.diagnostics.to_string();
        assert!(report.contains("Rows: 2738 of 32768"));
        assert!(report.contains("Black (id 4)"));
    }
}

// =============================================================================
// TIER 4: I/O and Lookup
// =============================================================================

mod tier4_io {
    use super::*;

    #[test]
    fn save_and_load_reference() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assets").join("smart_8color_stacks.npy");

        let output = reference();
        save_npy(&output.table, &path).unwrap();
        let loaded = load_npy(&path).unwrap();
        assert_eq!(loaded, output.table);
    }

    #[test]
    fn two_runs_are_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.npy");
        let second = dir.path().join("second.npy");

        save_npy(&reference().table, &first).unwrap();
        let serial = generate_lut(&LutParams::eight_color().with_parallel(false)).unwrap();
        save_npy(&serial.table, &second).unwrap();

        assert_eq!(
            std::fs::read(&first).unwrap(),
            std::fs::read(&second).unwrap()
        );
    }

    #[test]
    fn lookup_finds_exact_colours() {
        let params = LutParams::eight_color();
        let output = reference();
        let lut = ColorLut::from_table(output.table.clone(), &Mixer::new(&params)).unwrap();
        assert_eq!(lut.colors().len(), 2738);

        for entry in output.selection.entries.iter().step_by(97) {
            let (row, stack) = lut.nearest(entry.color).unwrap();
            assert_eq!(lut.colors()[row], entry.color);
            assert_eq!(stack.len(), 5);
        }

        let (row, _) = lut.nearest(Rgb::WHITE).unwrap();
        assert_eq!(row, 0);
    }

    #[test]
    fn load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.npy");
        std::fs::write(&path, b"definitely not numpy").unwrap();
        assert!(matches!(load_npy(&path), Err(io::IoError::BadMagic)));
    }
}
