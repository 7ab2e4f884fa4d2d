use speedview::speed_view::{LABELS, MAJOR_TICK, MINOR_TICK, TICK_COUNT};
use speedview::{
    Color, DrawCommand, FixedMetrics, Padding, Point, RectF, Scene, SpeedView, SpeedViewConfig,
    TextMeasure, TextPaint,
};

const EPS: f32 = 1e-3;

fn metrics() -> FixedMetrics {
    FixedMetrics::new(0.5, 0.75)
}

fn styled_view(width: i32, height: i32) -> SpeedView {
    let config = SpeedViewConfig::builder()
        .text_color(Color::BLACK)
        .text_size(20.0)
        .build();
    let mut view = SpeedView::new(config);
    view.on_size_changed(width, height);
    view
}

fn render(view: &SpeedView) -> Scene<FixedMetrics> {
    let mut scene = Scene::new(metrics());
    view.render(&mut scene);
    scene
}

fn assert_close(actual: Point, expected: (f64, f64)) {
    assert!(
        (actual.x as f64 - expected.0).abs() < EPS as f64
            && (actual.y as f64 - expected.1).abs() < EPS as f64,
        "{actual:?} != {expected:?}"
    );
}

#[test]
fn needle_matches_closed_form() {
    let mut view = styled_view(300, 300);
    assert_eq!(view.circle_rect(), RectF::from_origin(0.0, 0.0, 300.0, 300.0));
    for progress in [0, 25, 50, 100, 150] {
        view.set_progress(progress);
        let theta = progress as f64 * std::f64::consts::PI / 50.0;
        let (center, long_arm, short_arm) = (150.0, 30.0, 40.0);
        let needle = view.needle();
        assert_close(
            needle.start,
            (center - short_arm * theta.sin(), center + short_arm * theta.cos()),
        );
        assert_close(
            needle.end,
            (center + long_arm * theta.sin(), center - long_arm * theta.cos()),
        );
    }
}

#[test]
fn needle_scenarios() {
    let mut view = styled_view(300, 300);
    view.set_progress(0);
    assert_close(view.needle().start, (150.0, 190.0));
    assert_close(view.needle().end, (150.0, 120.0));

    view.set_progress(50);
    assert_close(view.needle().start, (150.0, 110.0));
    assert_close(view.needle().end, (150.0, 180.0));
}

#[test]
fn needle_uses_horizontal_center_for_both_axes() {
    let config = SpeedViewConfig::builder()
        .padding(Padding::new(20.0, 0.0, 0.0, 20.0))
        .build();
    let mut view = SpeedView::new(config);
    let rect = view.on_size_changed(300, 300);
    assert_eq!(rect, RectF::new(20.0, 0.0, 300.0, 280.0));
    // center_x = 160 while center_y = 140; the tail would end at y = 180
    // if it hung off the vertical center
    let needle = view.needle();
    assert_close(needle.start, (160.0, 200.0));
    assert_close(needle.end, (160.0, 140.0));
}

#[test]
fn scale_has_sixty_ticks_twelve_major() {
    let view = styled_view(300, 300);
    let scene = render(&view);
    let lines = scene.resolved_lines();
    // 60 ticks plus the needle
    assert_eq!(lines.len(), TICK_COUNT + 1);
    let ticks = &lines[..TICK_COUNT];

    let center = Point::new(150.0, 150.0);
    let mut major = 0;
    for (i, tick) in ticks.iter().enumerate() {
        let length = ((tick.to.x - tick.from.x).powi(2) + (tick.to.y - tick.from.y).powi(2)).sqrt();
        if i % 5 == 0 {
            major += 1;
            assert!((length - MAJOR_TICK.length).abs() < EPS);
            assert_eq!(tick.paint.stroke_width, MAJOR_TICK.stroke_width);
        } else {
            assert!((length - MINOR_TICK.length).abs() < EPS);
            assert_eq!(tick.paint.stroke_width, MINOR_TICK.stroke_width);
        }

        // outer end sits 5 units inside the top edge, turned i * 6 degrees clockwise
        let angle = (i as f32 * 6.0).to_radians();
        let expected = Point::new(center.x + 145.0 * angle.sin(), center.y - 145.0 * angle.cos());
        assert!((tick.from.x - expected.x).abs() < 0.01, "tick {i}: {:?}", tick.from);
        assert!((tick.from.y - expected.y).abs() < 0.01, "tick {i}: {:?}", tick.from);
    }
    assert_eq!(major, 12);
    assert!(scene.final_transform().is_identity());
}

#[test]
fn labels_sit_every_thirty_degrees() {
    let view = styled_view(400, 400);
    let scene = render(&view);
    let texts: Vec<_> = scene
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text {
                text,
                origin,
                paint,
            } => Some((text.clone(), *origin, *paint)),
            _ => None,
        })
        .collect();
    assert_eq!(texts.len(), 12);

    let measure = metrics();
    for (i, (text, origin, paint)) in texts.iter().enumerate() {
        assert_eq!(text, LABELS[i]);
        assert_eq!(*paint, TextPaint { color: Color::BLACK, size: 20.0 });

        let bounds = measure.text_bounds(text, paint);
        let anchor_x = origin.x + bounds.width / 2.0 - 200.0;
        let anchor_y = 200.0 - (origin.y - bounds.height / 2.0);
        let radius = (anchor_x * anchor_x + anchor_y * anchor_y).sqrt();
        assert!((radius - 150.0).abs() < 0.01, "label {text} radius {radius}");

        let mut degrees = anchor_x.atan2(anchor_y).to_degrees();
        if degrees < -0.01 {
            degrees += 360.0;
        }
        assert!((degrees - i as f32 * 30.0).abs() < 0.01, "label {text} at {degrees}");
    }
}

#[test]
fn frame_has_seventy_five_primitives() {
    let scene = render(&styled_view(500, 420));
    assert_eq!(scene.primitive_count(), 1 + 60 + 12 + 1 + 1);
    let saves = scene
        .commands()
        .iter()
        .filter(|c| **c == DrawCommand::Save)
        .count();
    let restores = scene
        .commands()
        .iter()
        .filter(|c| **c == DrawCommand::Restore)
        .count();
    assert_eq!((saves, restores), (1, 1));
}

#[test]
fn repeated_progress_renders_identically() {
    let mut view = styled_view(300, 300);
    view.set_progress(37);
    let first = render(&view);
    view.set_progress(37);
    let second = render(&view);
    assert_eq!(first.commands(), second.commands());
}

#[test]
fn zero_style_still_renders() {
    let mut view = SpeedView::new(SpeedViewConfig::default());
    view.on_size_changed(10, 10);
    let scene = render(&view);
    assert_eq!(scene.primitive_count(), 75);
    // tiny dial: the needle's long arm points backwards, nothing panics
    assert!(view.needle().end.y > 5.0);
}

#[test]
fn replay_onto_second_surface_matches() {
    let view = styled_view(300, 300);
    let scene = render(&view);
    let mut copy = Scene::new(metrics());
    scene.replay(&mut copy);
    assert_eq!(copy.commands(), scene.commands());
}
