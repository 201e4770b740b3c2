use mandelzoom_core::{
    AnimationState, Camera, ColorTheme, Command, Explorer, ExplorerSettings, Fractal,
    FractalParams, FrameDescriptor, IterationResult, Mandelbrot, MandelbrotDD, PrecisionMode,
    Preset,
};

fn explorer(precision: PrecisionMode) -> Explorer {
    Explorer::new(ExplorerSettings {
        width: 96,
        height: 64,
        precision,
        ..ExplorerSettings::default()
    })
    .unwrap()
}

/// Evaluate every pixel centre of a descriptor in its live precision.
fn evaluate(d: &FrameDescriptor) -> Vec<IterationResult> {
    let params = FractalParams::new(d.iteration_limit()).unwrap();
    let camera = d.camera();
    let mut out = Vec::with_capacity((d.width() * d.height()) as usize);
    for py in 0..d.height() {
        for px in 0..d.width() {
            let uv = d.pixel_uv(px, py);
            out.push(match camera {
                Camera::Native { .. } => {
                    Mandelbrot::new(params).iterate(camera.plane_point_native(uv))
                }
                Camera::Extended { .. } => MandelbrotDD::new(params).iterate(camera.plane_point(uv)),
            });
        }
    }
    out
}

fn payload_in_range(state: AnimationState) -> bool {
    match state {
        AnimationState::Building { progress } => (0.0..1.0).contains(&progress),
        AnimationState::AutoZooming { per_frame_factor } => per_frame_factor > 1.0,
        _ => true,
    }
}

#[test]
fn build_terminates_within_one_thousand_frames() {
    let mut e = explorer(PrecisionMode::Native);
    e.handle(Command::GoToPreset {
        preset: Preset::SeahorseValley,
    });
    e.handle(Command::Build);
    let mut frames = 0;
    while e.state() != AnimationState::Idle {
        assert!(payload_in_range(e.state()));
        e.tick();
        frames += 1;
        assert!(frames <= 1000);
    }
    assert_eq!(frames, 1000);
    assert_eq!(*e.camera(), Camera::home(PrecisionMode::Native));
}

#[test]
fn default_tour_runs_to_completion() {
    for mode in [PrecisionMode::Native, PrecisionMode::Extended] {
        let mut e = explorer(mode);
        e.handle(Command::StartTour);
        for _ in 0..1200 {
            assert!(matches!(e.state(), AnimationState::Touring { .. }));
            e.tick();
        }
        assert_eq!(e.state(), AnimationState::Idle);
        assert_eq!(*e.camera(), Camera::home(mode));
        assert_eq!(e.frame_count(), 1200);
    }
}

#[test]
fn tour_passes_every_stop() {
    let mut e = explorer(PrecisionMode::Native);
    e.handle(Command::StartTour);
    let mut stops = vec![0];
    while let AnimationState::Touring { stop_index, .. } = e.state() {
        if stops.last() != Some(&stop_index) {
            stops.push(stop_index);
        }
        e.tick();
    }
    assert_eq!(stops, vec![0, 1, 2]);
}

#[test]
fn interrupting_a_tour_stops_it() {
    let mut e = explorer(PrecisionMode::Native);
    e.handle(Command::StartTour);
    for _ in 0..10 {
        e.tick();
    }
    e.wheel(1.0, 48.0, 32.0);
    let camera = *e.camera();
    for _ in 0..10 {
        e.tick();
    }
    assert_eq!(e.state(), AnimationState::Idle);
    assert_eq!(*e.camera(), camera);
}

#[test]
fn home_frame_has_interior_and_exterior() {
    let e = explorer(PrecisionMode::Native);
    let results = evaluate(&e.descriptor());
    assert_eq!(results.len(), 96 * 64);
    let interior = results.iter().filter(|r| !r.escaped()).count();
    assert!(interior > 0);
    assert!(interior < results.len());
}

#[test]
fn precision_modes_agree_at_shallow_zoom() {
    let mut native = explorer(PrecisionMode::Native);
    let mut extended = explorer(PrecisionMode::Extended);
    for e in [&mut native, &mut extended] {
        e.handle(Command::GoToPreset {
            preset: Preset::TripleSpiral,
        });
        e.handle(Command::Reset);
    }
    let a = evaluate(&native.descriptor());
    let b = evaluate(&extended.descriptor());
    let differing = a.iter().zip(&b).filter(|(x, y)| x != y).count();
    // Both see the home view; only boundary pixels may round differently.
    assert!(differing * 20 < a.len(), "{differing} pixels differ");
}

#[test]
fn extended_camera_separates_pixels_native_cannot() {
    let mut e = explorer(PrecisionMode::Extended);
    e.handle(Command::GoToPreset {
        preset: Preset::SeahorseValley,
    });
    // 400 notches at 1.1 take the scale from 0.05 to about 1.4e-18.
    for _ in 0..400 {
        e.wheel(-1.0, 48.0, 32.0);
    }
    let d = e.descriptor();
    assert!(d.native.zoom > 1e17);
    assert!(d.max_iterations > 2000);

    let extended = d.camera();
    let native = extended.converted(PrecisionMode::Native);
    let row: Vec<_> = (0..d.width()).map(|px| d.pixel_uv(px, 10)).collect();

    let mut deep: Vec<_> = row.iter().map(|&uv| extended.plane_point(uv)).collect();
    deep.dedup();
    assert_eq!(deep.len(), row.len());

    let mut flat: Vec<_> = row.iter().map(|&uv| native.plane_point_native(uv)).collect();
    flat.dedup();
    assert!(flat.len() < 4, "f64 should collapse the row, got {}", flat.len());
}

#[test]
fn descriptor_tracks_theme() {
    let mut e = explorer(PrecisionMode::Native);
    e.handle(Command::SetColorTheme {
        theme: ColorTheme::Grayscale,
    });
    assert_eq!(e.tick().color_theme, ColorTheme::Grayscale);
}
