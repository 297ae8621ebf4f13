use std::{fs, path::PathBuf};

use noisebed::{
    dsp::noise::NoiseKind,
    engine::{AudioGraph, GraphConfig, Side, StereoWidth},
    profile::{Profile, ProfileError},
};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "noisebed-it-{}-{}.json",
        name,
        std::process::id()
    ))
}

#[test]
fn save_and_restore_graph_settings() {
    let path = temp_path("restore");
    let source = AudioGraph::new(GraphConfig::new().seed(1)).handle();
    source.set_gains([-3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0]);
    source.set_volume(0.35);
    source.set_width(StereoWidth::Wide);
    source.set_speed(1.4);
    source.set_noise_kinds(NoiseKind::Pink);
    source.to_profile().save(&path).unwrap();

    let target = AudioGraph::new(GraphConfig::new().seed(2)).handle();
    let profile = Profile::load(&path).unwrap();
    fs::remove_file(&path).unwrap();
    target.apply_profile(&profile);

    let restored = target.params();
    assert_eq!(target.gains(), source.gains());
    assert_eq!(restored.volume, 0.35);
    assert_eq!(restored.width, StereoWidth::Wide);
    assert_eq!(restored.speed, 1.4);
    assert_eq!(restored.kinds, [NoiseKind::Pink; 2]);
}

#[test]
fn malformed_file_leaves_settings_alone() {
    let path = temp_path("malformed");
    fs::write(&path, "{ \"gains\": [1, 2").unwrap();

    let handle = AudioGraph::new(GraphConfig::new().seed(1)).handle();
    handle.set_noise_kind(Side::Left, NoiseKind::Brown);
    let before = handle.settings();

    let result = Profile::load(&path);
    fs::remove_file(&path).unwrap();
    assert!(matches!(result, Err(ProfileError::Malformed(_))));
    if let Ok(profile) = result {
        handle.apply_profile(&profile);
    }
    assert_eq!(*handle.settings(), *before);
}

#[test]
fn missing_file_reports_not_found() {
    let path = temp_path("absent");
    let _ = fs::remove_file(&path);
    let err = Profile::load(&path).unwrap_err();
    assert!(matches!(err, ProfileError::NotFound(_)));
    assert!(err.to_string().contains("No profile file found"));
}

#[test]
fn profile_written_by_desktop_app_is_accepted() {
    let path = temp_path("desktop");
    fs::write(
        &path,
        r#"{
  "Gains": [4, 3, 1, -2, -4, -6, -8, -10],
  "Volume": 0.6,
  "Width": 1,
  "Speed": 1,
  "Noise": "Brown"
}"#,
    )
    .unwrap();

    let profile = Profile::load(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(profile.noise, NoiseKind::Brown);
    assert_eq!(profile.gains[0], 4.0);
    assert_eq!(profile.width, 1.0);
}
