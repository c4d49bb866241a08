use device_mirror::screen::messages::WindowEvent;
use device_mirror::screen::ports::WindowCoord;
use device_mirror::screen::window_state::WindowFlags;
use device_mirror::screen::{Point, ScreenParams, Size};

use mock_ports::{present_first_frame, push_frame, screen_with, WindowCall};

const PORTRAIT: Size = Size::new(1080, 1920);
const LANDSCAPE: Size = Size::new(1920, 1080);

#[test]
fn maximized_content_changes_resize_once_from_entry_baseline() {
    let (mut screen, handles, mocks) = screen_with(ScreenParams::default());
    present_first_frame(&mut screen, &handles, PORTRAIT);
    mocks.clear_calls();

    screen.handle_window_event(WindowEvent::Maximized);
    push_frame(&mut screen, &handles, LANDSCAPE);
    push_frame(&mut screen, &handles, Size::new(720, 1280));
    assert!(mocks.resizes().is_empty());
    assert!(screen.resize_pending());

    screen.handle_window_event(WindowEvent::Restored);

    // 607x1080 scaled from 1080x1920 to 720x1280, then made optimal.
    assert_eq!(mocks.resizes(), vec![Size::new(404, 718)]);
    assert!(!screen.resize_pending());
    assert_eq!(screen.window_flags(), WindowFlags::default());
}

#[test]
fn restored_while_fullscreen_waits_for_fullscreen_exit() {
    let (mut screen, handles, mocks) = screen_with(ScreenParams::default());
    present_first_frame(&mut screen, &handles, PORTRAIT);
    mocks.clear_calls();

    screen.handle_window_event(WindowEvent::Maximized);
    screen.toggle_fullscreen();
    push_frame(&mut screen, &handles, LANDSCAPE);

    screen.handle_window_event(WindowEvent::Restored);
    assert!(screen.window_flags().maximized && screen.window_flags().fullscreen);
    assert!(mocks.resizes().is_empty());

    screen.toggle_fullscreen();
    assert!(screen.window_flags().maximized);
    assert!(mocks.resizes().is_empty());

    screen.handle_window_event(WindowEvent::Restored);
    assert_eq!(mocks.resizes(), vec![Size::new(1079, 607)]);
    assert_eq!(
        &mocks.window_calls()[..2],
        &[WindowCall::SetFullscreen(true), WindowCall::SetFullscreen(false)]
    );
}

#[test]
fn leaving_fullscreen_applies_deferred_resize() {
    let (mut screen, handles, mocks) = screen_with(ScreenParams::default());
    present_first_frame(&mut screen, &handles, PORTRAIT);
    mocks.clear_calls();

    screen.toggle_fullscreen();
    push_frame(&mut screen, &handles, LANDSCAPE);
    assert!(mocks.resizes().is_empty());

    screen.toggle_fullscreen();
    assert_eq!(mocks.resizes(), vec![Size::new(1079, 607)]);
    assert!(!screen.window_flags().fullscreen);
}

#[test]
fn refused_fullscreen_switch_keeps_state() {
    let (mut screen, handles, mocks) = screen_with(ScreenParams::default());
    present_first_frame(&mut screen, &handles, PORTRAIT);
    mocks.with_window(|window| window.fail_fullscreen = true);

    screen.toggle_fullscreen();
    assert!(!screen.window_flags().fullscreen);
}

#[test]
fn fullscreen_requested_at_startup_is_entered_with_first_frame() {
    let params = ScreenParams {
        fullscreen: true,
        ..ScreenParams::default()
    };
    let (mut screen, handles, mocks) = screen_with(params);
    present_first_frame(&mut screen, &handles, PORTRAIT);
    assert!(screen.window_flags().fullscreen);
    assert!(mocks
        .window_calls()
        .contains(&WindowCall::SetFullscreen(true)));
}

#[test]
fn pixel_perfect_restores_maximized_window_and_drops_pending_resize() {
    let (mut screen, handles, mocks) = screen_with(ScreenParams::default());
    present_first_frame(&mut screen, &handles, PORTRAIT);
    mocks.clear_calls();

    screen.handle_window_event(WindowEvent::Maximized);
    push_frame(&mut screen, &handles, LANDSCAPE);
    screen.resize_to_pixel_perfect();

    assert!(mocks.window_calls().contains(&WindowCall::Restore));
    assert_eq!(mocks.resizes(), vec![LANDSCAPE]);
    assert!(!screen.resize_pending());

    screen.handle_window_event(WindowEvent::Restored);
    assert_eq!(mocks.resizes(), vec![LANDSCAPE]);
}

#[test]
fn pixel_perfect_is_ignored_when_minimized() {
    let (mut screen, handles, mocks) = screen_with(ScreenParams::default());
    present_first_frame(&mut screen, &handles, PORTRAIT);
    mocks.clear_calls();

    screen.handle_window_event(WindowEvent::Minimized);
    screen.resize_to_pixel_perfect();
    assert!(mocks.window_calls().is_empty());
}

#[test]
fn resize_to_fit_removes_borders_and_keeps_center() {
    let (mut screen, handles, mocks) = screen_with(ScreenParams::default());
    present_first_frame(&mut screen, &handles, PORTRAIT);
    mocks.with_window(|window| {
        window.size = Size::new(800, 1080);
        window.position = Point::new(100, 0);
    });
    mocks.clear_calls();

    screen.resize_to_fit();
    assert_eq!(
        mocks.window_calls(),
        vec![
            WindowCall::SetSize(Size::new(607, 1080)),
            WindowCall::SetPosition(WindowCoord::At(196), WindowCoord::At(0)),
        ]
    );
}

#[test]
fn resize_to_fit_does_nothing_while_maximized() {
    let (mut screen, handles, mocks) = screen_with(ScreenParams::default());
    present_first_frame(&mut screen, &handles, PORTRAIT);
    mocks.clear_calls();

    screen.handle_window_event(WindowEvent::Maximized);
    screen.resize_to_fit();
    assert!(mocks.window_calls().is_empty());
}

#[test]
fn size_changes_rerender_with_new_content_rect() {
    let (mut screen, handles, mocks) = screen_with(ScreenParams::default());
    present_first_frame(&mut screen, &handles, PORTRAIT);

    mocks.with_window(|window| window.size = Size::new(1000, 1000));
    screen.handle_window_event(WindowEvent::SizeChanged);
    // 1000 * 1080 / 1920 = 562 wide, centered.
    assert_eq!(screen.content_rect().w, 562);
    assert_eq!(screen.content_rect().x, 219);
}

#[test]
fn lifecycle_events_before_first_frame_are_ignored() {
    let (mut screen, _handles, _mocks) = screen_with(ScreenParams::default());
    screen.handle_window_event(WindowEvent::Maximized);
    assert_eq!(screen.window_flags(), WindowFlags::default());
}

#[test]
fn window_passthroughs_reach_the_window() {
    let (mut screen, _handles, mocks) = screen_with(ScreenParams::default());
    screen.hide();
    screen.raise();
    screen.set_always_on_top(false);
    assert_eq!(
        mocks.window_calls(),
        vec![
            WindowCall::Hide,
            WindowCall::Raise,
            WindowCall::AlwaysOnTop(false)
        ]
    );
}
