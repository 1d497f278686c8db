//! Shared fixtures for integration and load testing.

#![allow(dead_code)]

use pattern_dispatch::{Dispatcher, Handler, Params};

/// Capitalise the first letter of every alphabetic run, lowercase the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

fn param<'a>(params: &'a Params, name: &str) -> &'a str {
    params.get(name).map(String::as_str).unwrap_or_default()
}

/// Voice command intents, registered in the order an assistant would
/// declare them. Handlers sharing several templates are registered once per
/// template, innermost first.
pub fn voice_intents() -> Dispatcher<String> {
    let mut d = Dispatcher::new();

    let play = Handler::new("play", &[], |_: &Params| "Playing music".to_string());
    d.register("play", play).unwrap();

    let open_app = Handler::new("open_app", &["app"], |p: &Params| {
        format!("Opening {}", title_case(param(p, "app")))
    });
    d.register("open <app>", open_app).unwrap();

    let open_file_with = Handler::new("open_file_with", &["file", "app"], |p: &Params| {
        format!(
            "Asking {} to open \"{}\"",
            title_case(param(p, "app")),
            param(p, "file")
        )
    });
    d.register("open <file> (with|using) <app>", open_file_with)
        .unwrap();

    let play_song_with = Handler::new("play_song_with", &["song", "app"], |p: &Params| {
        let song = title_case(param(p, "song"));
        match p.get("app") {
            Some(app) => format!("Asking {} to play \"{}\"", title_case(app), song),
            None => format!("Playing \"{}\"", song),
        }
    });
    d.register("play <song> with <app=(zune|play music)>", play_song_with.clone())
        .unwrap();
    d.register("play <song>", play_song_with).unwrap();

    let video = Handler::new("video", &["video", "player"], |p: &Params| {
        let player = p.get("player").map(String::as_str).unwrap_or("youtube");
        format!(
            "Asking {} to play \"{}\"",
            title_case(player),
            title_case(param(p, "video"))
        )
    });
    d.register("play video <video> with <player>", video.clone())
        .unwrap();
    d.register("play video <video>", video).unwrap();

    let light_time = Handler::new("light_time", &["time"], |p: &Params| {
        format!("The light will turn on {}", param(p, "time"))
    });
    d.register("turn on the light <time>", light_time).unwrap();

    let light_at = Handler::new("light_at", &["time"], |p: &Params| {
        format!("The light will turn on at {}", param(p, "time"))
    });
    d.register("turn on the light at <time>", light_at).unwrap();

    let light = Handler::new("light", &[], |_: &Params| "Turning on the light".to_string());
    d.register("turn on the light pronto", light.clone()).unwrap();
    d.register("turn on the light now", light.clone()).unwrap();
    d.register("turn on the light", light).unwrap();

    d.build();
    d
}

/// Inputs paired with the response `voice_intents` must produce.
pub const VOICE_CASES: &[(&str, &str)] = &[
    ("play", "Playing music"),
    ("open slack", "Opening Slack"),
    ("play nightswimming", "Playing \"Nightswimming\""),
    ("play video dankest memes", "Asking Youtube to play \"Dankest Memes\""),
    ("open myfile.txt with notepad", "Asking Notepad to open \"myfile.txt\""),
    (
        "play video help I'm alive with vimeo",
        "Asking Vimeo to play \"Help I'M Alive\"",
    ),
    ("play exposition with zune", "Asking Zune to play \"Exposition\""),
    (
        "play all my friends with play music",
        "Asking Play Music to play \"All My Friends\"",
    ),
    ("play with or without you", "Playing \"With Or Without You\""),
    (
        "play with or without you with play music",
        "Asking Play Music to play \"With Or Without You\"",
    ),
    (
        "play play music with play music",
        "Asking Play Music to play \"Play Music\"",
    ),
    (
        "play play music with play music with zune",
        "Asking Zune to play \"Play Music With Play Music\"",
    ),
    ("turn on the light", "Turning on the light"),
    ("turn on the light now", "Turning on the light"),
    ("turn on the light pronto", "Turning on the light"),
    ("turn on the light soon", "The light will turn on soon"),
    ("turn on the light at 3:00", "The light will turn on at 3:00"),
];
