use pretty_assertions::assert_eq;
use skiggle::{
    encode, extract, normalize, Candidate, Language, Point, RecognitionSession, RecognizerConfig,
    ReferenceTable, Segment, StrokeOutcome, TemplateSet,
};

fn pts(raw: &[(f32, f32)]) -> Vec<Point> {
    raw.iter().map(|&(x, y)| Point { x, y }).collect()
}

fn session(language: Language) -> RecognitionSession {
    RecognitionSession::new(language, RecognizerConfig::default()).unwrap()
}

fn candidates(outcome: StrokeOutcome) -> Vec<Candidate> {
    match outcome {
        StrokeOutcome::Candidates(c) => c,
        other => panic!("expected candidates, got {:?}", other),
    }
}

fn glyphs(list: &[Candidate]) -> String {
    list.iter().map(|c| c.glyph).collect()
}

// Slightly wobbly, densely sampled version of a polyline
fn hand_drawn(corners: &[(f32, f32)]) -> Vec<Point> {
    let mut res = vec![Point { x: corners[0].0, y: corners[0].1 }];
    for w in corners.windows(2) {
        let ((x0, y0), (x1, y1)) = (w[0], w[1]);
        for step in 1..=10 {
            let t = step as f32 / 10.0;
            let wobble = if step % 2 == 0 { 0.8 } else { -0.8 };
            let (x, y) = (x0 + (x1 - x0) * t, y0 + (y1 - y0) * t);
            if step == 10 {
                res.push(Point { x, y });
            } else if (x1 - x0).abs() > (y1 - y0).abs() {
                res.push(Point { x, y: y + wobble });
            } else {
                res.push(Point { x: x + wobble, y });
            }
        }
    }
    res
}

// Densely sampled polyline with up to 2 units of deterministic noise on each axis
fn noisy(corners: &[(f32, f32)]) -> Vec<Point> {
    let mut res = vec![Point { x: corners[0].0, y: corners[0].1 }];
    let mut i = 0;
    for w in corners.windows(2) {
        let ((x0, y0), (x1, y1)) = (w[0], w[1]);
        for step in 1..=30 {
            i += 1;
            let t = step as f32 / 30.0;
            res.push(Point {
                x: x0 + (x1 - x0) * t + 2.0 * (i as f32 * 2.3).sin(),
                y: y0 + (y1 - y0) * t + 2.0 * (i as f32 * 1.7).cos(),
            });
        }
    }
    res
}

// Back and forth along a 10 unit line, `samples` points in all
fn zigzag(samples: usize) -> Vec<Point> {
    (0..samples).map(|i| Point { x: if i % 2 == 0 { 0.0 } else { 10.0 }, y: 0.0 }).collect()
}

#[test]
fn encode_has_fixed_width_for_every_language() {
    let config = RecognizerConfig::default();
    let inks = [
        vec![pts(&[(3.0, 3.0)])],
        vec![pts(&[(0.0, 0.0), (0.0, 120.0), (80.0, 120.0)]), pts(&[(0.0, 60.0), (80.0, 60.0)])],
        // More strokes and segments than any stroke range holds
        (0..20)
            .map(|i| {
                let y = i as f32;
                (0..8).map(|k| Point { x: k as f32 * 60.0, y: y + (k % 2) as f32 * 90.0 }).collect()
            })
            .collect(),
    ];
    for language in Language::ALL {
        ReferenceTable::for_language(language, &config).unwrap();
        for ink in &inks {
            let segmented: Vec<Vec<Segment>> = ink
                .iter()
                .map(|stroke| {
                    extract(&normalize(stroke, &config).unwrap().stroke, language, &config)
                })
                .collect();
            let width = encode(&language.scheme(), &segmented).width();
            assert_eq!(width, language.scheme().bit_width());
        }
    }
}

#[test]
fn identical_ink_gives_identical_signatures() {
    let ink = vec![hand_drawn(&[(0.0, 120.0), (0.0, 0.0), (100.0, 120.0), (100.0, 0.0)])];
    let mut a = session(Language::Latin);
    let mut b = session(Language::Latin);
    for stroke in &ink {
        a.add_stroke(stroke).unwrap();
        b.add_stroke(stroke).unwrap();
    }
    assert_eq!(a.character().signature(), b.character().signature());
}

#[test]
fn hand_drawn_strokes_match_their_glyph() {
    let mut s = session(Language::Latin);
    let ink = hand_drawn(&[(0.0, 120.0), (0.0, 0.0), (100.0, 120.0), (100.0, 0.0)]);
    let res = candidates(s.add_stroke(&ink).unwrap());
    assert_eq!(res[0].glyph, 'N');
    assert_eq!(res[0].score, 1.0);
}

#[test]
fn noisy_loop_is_ink_not_a_clear() {
    // About 2.01 as a raw polyline, about 1.92 along the smoothed path
    let ink = noisy(&[(0.0, 0.0), (0.0, 120.0), (100.0, 120.0), (100.0, 0.0), (10.0, 0.0)]);
    let ns = normalize(&ink, &RecognizerConfig::default()).unwrap();
    assert!(!ns.is_clear_gesture);
    assert!(ns.stroke.metrics().clear_ratio() < 2.0);

    let mut s = session(Language::Latin);
    let res = candidates(s.add_stroke(&ink).unwrap());
    assert_eq!(res[0].glyph, 'O');
    assert_eq!(s.character().stroke_count(), 1);
}

#[test]
fn clear_then_redraw_reproduces_ranking() {
    let ink = [pts(&[(0.0, 0.0), (100.0, 0.0)]), pts(&[(50.0, 0.0), (50.0, 120.0)])];
    let mut s = session(Language::Latin);
    let mut first: Vec<StrokeOutcome> = Vec::new();
    for stroke in &ink {
        first.push(s.add_stroke(stroke).unwrap());
    }

    let scribble = pts(&[
        (0.0, 0.0),
        (40.0, 0.0),
        (0.0, 5.0),
        (40.0, 5.0),
        (0.0, 10.0),
        (40.0, 10.0),
        (0.0, 15.0),
    ]);
    assert_eq!(s.add_stroke(&scribble).unwrap(), StrokeOutcome::Cleared);
    assert!(s.character().is_empty());

    let mut second: Vec<StrokeOutcome> = Vec::new();
    for stroke in &ink {
        second.push(s.add_stroke(stroke).unwrap());
    }
    assert_eq!(first, second);
}

#[test]
fn clear_gesture_boundary() {
    // Width 10, height 0: the path length decides
    // Every turn adds half a pass to the smoothed length
    let mut s = session(Language::Latin);
    assert!(matches!(s.add_stroke(&zigzag(3)).unwrap(), StrokeOutcome::Candidates(_)));

    let config = RecognizerConfig::default();
    let below = normalize(&zigzag(3), &config).unwrap();
    assert!(below.stroke.metrics().clear_ratio() < 2.0);
    assert!(!below.is_clear_gesture);

    let above = normalize(&zigzag(5), &config).unwrap();
    assert!(above.stroke.metrics().clear_ratio() > 2.0);
    assert!(above.is_clear_gesture);

    // The threshold is a parameter
    let lenient = RecognizerConfig { clear_ratio_threshold: 3.5, ..RecognizerConfig::default() };
    assert!(!normalize(&zigzag(6), &lenient).unwrap().is_clear_gesture);
}

#[test]
fn single_point_tap_is_one_segment() {
    let config = RecognizerConfig::default();
    for language in Language::ALL {
        let ns = normalize(&pts(&[(42.0, 17.0)]), &config).unwrap();
        assert!(!ns.is_clear_gesture);
        assert_eq!(extract(&ns.stroke, language, &config).len(), 1);
    }
    let mut s = session(Language::Latin);
    s.add_stroke(&pts(&[(42.0, 17.0)])).unwrap();
    let committed = &s.character().strokes()[0];
    assert_eq!(committed.segments().len(), 1);
    assert_eq!(committed.stroke().points(), &pts(&[(42.0, 16.5), (42.0, 17.5)])[..]);
}

#[test]
fn second_stroke_excludes_single_stroke_references() {
    let mut s = session(Language::Chinese);
    let one_stroke: Vec<char> = s
        .table()
        .entries()
        .iter()
        .filter(|e| e.stroke_count == 1)
        .map(|e| e.glyph)
        .collect();
    assert!(one_stroke.contains(&'一'));

    let res = candidates(s.add_stroke(&pts(&[(0.0, 60.0), (120.0, 60.0)])).unwrap());
    assert_eq!(&glyphs(&res)[..], "一二十丁七三下又土大");
    assert_eq!(res[0].score, 1.0);
    assert!(res[0].is_best);
    assert_eq!(res[1].score, 0.5);
    assert_eq!(res[2].score, 0.5);

    let res = candidates(s.add_stroke(&pts(&[(60.0, 0.0), (60.0, 120.0)])).unwrap());
    assert_eq!(res[0].glyph, '十');
    assert_eq!(res[0].score, 1.0);
    assert!(res.iter().all(|c| !one_stroke.contains(&c.glyph)));
}

#[test]
fn canonical_strokes_rank_their_glyph_first() {
    for language in Language::ALL {
        let templates = TemplateSet::bundled(language).unwrap();
        let mut s = session(language);
        for template in &templates.glyphs {
            let mut last: Vec<Candidate> = Vec::new();
            for stroke in template.stroke_points() {
                last = candidates(s.add_stroke(&stroke).unwrap());
            }
            assert_eq!(last[0].glyph, template.glyph);
            assert_eq!(last[0].score, 1.0);
            assert!(last[0].is_best);
            let picked = s.select(0).unwrap();
            assert_eq!(picked.glyph, template.glyph);
        }
    }
}

#[test]
fn language_switch_resets_character() {
    let mut s = session(Language::Latin);
    s.add_stroke(&pts(&[(0.0, 0.0), (0.0, 120.0)])).unwrap();
    s.set_language(Language::Chinese).unwrap();
    assert!(s.character().is_empty());
    assert_eq!(s.character().signature().width(), Language::Chinese.scheme().bit_width());
    let res = candidates(s.add_stroke(&pts(&[(0.0, 60.0), (120.0, 60.0)])).unwrap());
    assert_eq!(res[0].glyph, '一');
}

#[test]
fn recognize_whole_character() {
    let strokes = vec![pts(&[(0.0, 0.0), (100.0, 0.0)]), pts(&[(50.0, 0.0), (50.0, 120.0)])];
    let res = skiggle::recognize(&strokes, Language::Latin, 3).unwrap();
    assert!(res.len() <= 3);
    assert_eq!(res[0].glyph, 'T');
}
