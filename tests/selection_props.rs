//! Property tests for catalog ranking and menu construction

use proptest::prelude::*;
use std::collections::HashSet;
use ytloader::extractor::Format;
use ytloader::selection::{
    build_options, cancel_ordinal, normalize, sort_catalog, StreamKind, MAX_AUDIO_OPTIONS,
};

fn codec() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("none".to_string())),
        Just(Some("avc1.640028".to_string())),
        Just(Some("vp9".to_string())),
        Just(Some("mp4a.40.2".to_string())),
        Just(Some("opus".to_string())),
    ]
}

prop_compose! {
    fn arb_format()(
        id in 0u32..1000,
        ext in prop_oneof![Just("mp4"), Just("webm"), Just("m4a")],
        vcodec in codec(),
        acodec in codec(),
        height in proptest::option::of(prop_oneof![Just(144u32), Just(360), Just(720), Just(1080), Just(2160)]),
        abr in proptest::option::of(prop_oneof![Just(48.0f32), Just(128.0), Just(160.0)]),
    ) -> Format {
        Format {
            format_id: id.to_string(),
            ext: ext.to_string(),
            vcodec,
            acodec,
            height,
            abr,
            ..Default::default()
        }
    }
}

proptest! {
    #[test]
    fn normalized_catalog_is_ranked(raw in proptest::collection::vec(arb_format(), 0..40)) {
        let catalog = normalize(raw);

        for pair in catalog.windows(2) {
            prop_assert!(pair[0].rank_key() <= pair[1].rank_key());
        }

        let mut again = catalog.clone();
        sort_catalog(&mut again);
        prop_assert_eq!(again, catalog);
    }

    #[test]
    fn menu_has_unique_heights_and_few_audio_entries(raw in proptest::collection::vec(arb_format(), 0..40)) {
        let options = build_options(&normalize(raw));

        let video_heights: Vec<u32> = options
            .iter()
            .filter(|o| !o.is_audio())
            .filter_map(|o| o.format.height())
            .collect();
        let unique: HashSet<u32> = video_heights.iter().copied().collect();
        prop_assert_eq!(unique.len(), video_heights.len());

        let audio = options.iter().filter(|o| o.kind == StreamKind::AudioOnly).count();
        prop_assert!(audio <= MAX_AUDIO_OPTIONS);

        for (index, option) in options.iter().enumerate() {
            prop_assert_eq!(option.ordinal, index + 1);
        }
        prop_assert_eq!(cancel_ordinal(&options), options.len() + 1);
    }
}
