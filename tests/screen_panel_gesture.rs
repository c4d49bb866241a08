use device_mirror::screen::messages::{MouseButton, PointerEvent};
use device_mirror::screen::panel::CursorShape;
use device_mirror::screen::{Point, Rect, Screen, ScreenHandles, ScreenParams, Size};

use mock_ports::{present_first_frame, screen_with, DisplayCall, Mocks, WindowCall};

const PORTRAIT: Size = Size::new(1080, 1920);
const TWO_BUTTONS: &str = r#"{"type":"panel","data":{"buttons":[
    {"id":"home","text":"Home"},
    {"id":"back","text":"Back"}
]}}"#;

fn down(x: i32, y: i32) -> PointerEvent {
    PointerEvent::ButtonDown {
        point: Point::new(x, y),
        button: MouseButton::Left,
        clicks: 1,
    }
}

fn up(x: i32, y: i32) -> PointerEvent {
    PointerEvent::ButtonUp {
        point: Point::new(x, y),
        button: MouseButton::Left,
        clicks: 1,
    }
}

fn motion(x: i32, y: i32) -> PointerEvent {
    PointerEvent::Motion {
        point: Point::new(x, y),
    }
}

/// Panel enabled, two buttons, window 657x1080: content 607 wide, panel
/// columns 607..657, buttons at x 617..647, y 10..55 and 65..110.
fn panel_screen() -> (Screen, ScreenHandles, Mocks) {
    let params = ScreenParams {
        panel_show: true,
        ..ScreenParams::default()
    };
    let (mut screen, handles, mocks) = screen_with(params);
    present_first_frame(&mut screen, &handles, PORTRAIT);
    assert!(screen.update_panel_json(TWO_BUTTONS).unwrap());
    mocks.clear_calls();
    (screen, handles, mocks)
}

#[test]
fn initial_window_reserves_logical_panel_width() {
    let (screen, _handles, mocks) = panel_screen();
    assert_eq!(mocks.with_window(|window| window.size), Size::new(657, 1080));
    assert_eq!(screen.content_rect(), Rect::new(0, 0, 607, 1080));
}

#[test]
fn drag_into_panel_sends_exactly_one_synthetic_release() {
    let (mut screen, _handles, mocks) = panel_screen();

    screen.handle_pointer_event(down(300, 500));
    screen.handle_pointer_event(motion(400, 500));
    screen.handle_pointer_event(motion(620, 500));
    screen.handle_pointer_event(motion(630, 600));

    assert_eq!(
        mocks.forwarded(),
        vec![down(300, 500), motion(400, 500), up(620, 500)]
    );
    let release = mocks.forwarded_pointers()[2];
    assert_eq!(release.position.screen_size, PORTRAIT);
    assert!(!screen.panel().pressed_outside());
}

#[test]
fn button_press_emits_click_and_is_not_forwarded() {
    let (mut screen, _handles, mocks) = panel_screen();

    screen.handle_pointer_event(down(620, 70));
    assert!(mocks.forwarded().is_empty());
    assert_eq!(
        mocks.sent_events().last().map(String::as_str),
        Some(r#"{"type":"panel_button_click","data":{"id":"back"}}"#)
    );

    // The release is forwarded so remote state stays consistent.
    screen.handle_pointer_event(up(620, 70));
    assert_eq!(mocks.forwarded(), vec![up(620, 70)]);
}

#[test]
fn press_on_panel_background_is_swallowed() {
    let (mut screen, _handles, mocks) = panel_screen();
    let sent_before = mocks.sent_events().len();
    screen.handle_pointer_event(down(610, 900));
    assert!(mocks.forwarded().is_empty());
    assert_eq!(mocks.sent_events().len(), sent_before);
}

#[test]
fn hovering_buttons_swaps_cursor() {
    let (mut screen, _handles, mocks) = panel_screen();
    screen.handle_pointer_event(motion(620, 20));
    screen.handle_pointer_event(motion(625, 30));
    screen.handle_pointer_event(motion(300, 30));
    assert_eq!(
        mocks.window_calls(),
        vec![
            WindowCall::Cursor(CursorShape::Hand),
            WindowCall::Cursor(CursorShape::Arrow)
        ]
    );
    assert_eq!(mocks.forwarded(), vec![motion(300, 30)]);
}

#[test]
fn cursor_failure_disables_hover_cursor() {
    let (mut screen, _handles, mocks) = panel_screen();
    mocks.with_window(|window| window.fail_cursor = true);

    screen.handle_pointer_event(motion(620, 20));
    screen.handle_pointer_event(motion(300, 30));
    screen.handle_pointer_event(motion(620, 20));
    assert_eq!(mocks.window_calls(), vec![WindowCall::Cursor(CursorShape::Hand)]);
}

#[test]
fn hiding_panel_gives_its_column_back_to_content() {
    let (mut screen, _handles, mocks) = panel_screen();
    screen
        .update_panel_json(r#"{"type":"panel","data":{"buttons":[],"visible":false}}"#)
        .unwrap();

    assert_eq!(screen.content_rect(), Rect::new(25, 0, 607, 1080));
    screen.handle_pointer_event(motion(640, 500));
    assert_eq!(mocks.forwarded(), vec![motion(640, 500)]);
}

#[test]
fn renders_carry_panel_buttons() {
    let (mut screen, _handles, mocks) = panel_screen();
    screen.render(false);
    let last = mocks.display_calls().pop();
    match last {
        Some(DisplayCall::Render { panel_buttons, .. }) => {
            assert_eq!(panel_buttons, vec!["home".to_string(), "back".to_string()]);
        }
        other => panic!("expected a render, got {other:?}"),
    }
}

#[test]
fn rejected_update_keeps_previous_buttons() {
    let (mut screen, _handles, _mocks) = panel_screen();
    let bad = r#"{"type":"panel","data":{"buttons":[{"id":"","text":"x"}]}}"#;
    assert!(screen.update_panel_json(bad).is_err());
    assert_eq!(screen.panel().panel().buttons().len(), 2);

    assert!(!screen.update_panel_json(r#"{"type":"other"}"#).unwrap());
    assert_eq!(screen.panel().panel().buttons().len(), 2);
}

#[test]
fn panel_message_without_buttons_keeps_previous_buttons() {
    let (mut screen, _handles, _mocks) = panel_screen();
    assert!(screen
        .update_panel_json(r#"{"type":"panel","data":{}}"#)
        .is_err());
    assert_eq!(screen.panel().panel().buttons().len(), 2);
    assert!(screen.panel().visible());
}

/// Same window as `panel_screen`, with two drawable pixels per window pixel:
/// drawable 1314x2160, panel 100 wide at x 1214, content 1214x2158 at y 1,
/// buttons at x 1224..1304, y 11..56 and 66..111.
fn hidpi_panel_screen() -> (Screen, ScreenHandles, Mocks) {
    let params = ScreenParams {
        panel_show: true,
        ..ScreenParams::default()
    };
    let (mut screen, handles, mocks) = screen_with(params);
    mocks.with_window(|window| window.hidpi = 2);
    present_first_frame(&mut screen, &handles, PORTRAIT);
    assert!(screen.update_panel_json(TWO_BUTTONS).unwrap());
    mocks.clear_calls();
    (screen, handles, mocks)
}

#[test]
fn hidpi_layout_is_in_drawable_pixels() {
    let (mut screen, _handles, mocks) = hidpi_panel_screen();
    assert_eq!(mocks.with_window(|window| window.size), Size::new(657, 1080));
    assert_eq!(screen.content_rect(), Rect::new(0, 1, 1214, 2158));

    screen.render(false);
    match mocks.display_calls().pop() {
        Some(DisplayCall::Render { panel_rect, .. }) => {
            assert_eq!(panel_rect, Some(Rect::new(1214, 0, 100, 2160)));
        }
        other => panic!("expected a render, got {other:?}"),
    }
}

#[test]
fn hidpi_window_press_hits_scaled_button() {
    let (mut screen, _handles, mocks) = hidpi_panel_screen();

    // Window x 615 is drawable x 1230; unscaled it would land on content.
    screen.handle_pointer_event(down(615, 40));
    assert!(mocks.forwarded().is_empty());
    assert_eq!(
        mocks.sent_events().last().map(String::as_str),
        Some(r#"{"type":"panel_button_click","data":{"id":"back"}}"#)
    );
}

#[test]
fn hidpi_drag_into_panel_sends_exactly_one_synthetic_release() {
    let (mut screen, _handles, mocks) = hidpi_panel_screen();

    screen.handle_pointer_event(down(300, 500));
    // Drawable x 1210 is still content.
    screen.handle_pointer_event(motion(605, 500));
    screen.handle_pointer_event(motion(610, 500));
    screen.handle_pointer_event(motion(640, 700));

    assert_eq!(
        mocks.forwarded(),
        vec![down(300, 500), motion(605, 500), up(610, 500)]
    );
    let release = mocks.forwarded_pointers()[2];
    assert_eq!(release.position.screen_size, PORTRAIT);
    assert!(!screen.panel().pressed_outside());
}

#[test]
fn panel_updates_are_ignored_when_panel_disabled() {
    let (mut screen, handles, _mocks) = screen_with(ScreenParams::default());
    present_first_frame(&mut screen, &handles, PORTRAIT);
    assert!(screen.update_panel_json(TWO_BUTTONS).unwrap());
    assert!(screen.panel().panel().buttons().is_empty());
    assert!(!screen.panel().visible());
}
