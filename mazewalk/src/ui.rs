use std::{
    io::{self, Write},
    time::Duration,
};

use crossterm::{
    cursor::MoveTo,
    event::{read, Event, KeyCode, KeyEvent},
    queue,
    style::{Attribute, ContentStyle, PrintStyledContent},
    terminal::{self, Clear, ClearType},
};

use mazegrid::Dims;

use crate::{helpers, logging};

const INDICATOR_CHAR: char = '|';

pub fn box_center_screen(box_dims: Dims) -> io::Result<Dims> {
    let size_u16 = terminal::size()?;
    Ok(helpers::box_center(Dims(0, 0), size_u16.into(), box_dims))
}

pub fn draw_str(
    out: &mut impl Write,
    x: i32,
    y: i32,
    text: &str,
    style: ContentStyle,
) -> io::Result<()> {
    if x < 0 || y < 0 || x > u16::MAX as i32 || y > u16::MAX as i32 {
        return Ok(());
    }

    queue!(
        out,
        MoveTo(x as u16, y as u16),
        PrintStyledContent(style.apply(text))
    )
}

pub fn draw_char(
    out: &mut impl Write,
    x: i32,
    y: i32,
    character: char,
    style: ContentStyle,
) -> io::Result<()> {
    if x < 0 || y < 0 || x > u16::MAX as i32 || y > u16::MAX as i32 {
        return Ok(());
    }

    queue!(
        out,
        MoveTo(x as u16, y as u16),
        PrintStyledContent(style.apply(character))
    )
}

pub fn draw_box(out: &mut impl Write, pos: Dims, size: Dims, style: ContentStyle) -> io::Result<()> {
    draw_str(
        out,
        pos.0,
        pos.1,
        &format!("╭{}╮", "─".repeat(size.0 as usize - 2)),
        style,
    )?;

    for y in pos.1 + 1..pos.1 + size.1 - 1 {
        draw_char(out, pos.0, y, '│', style)?;
        draw_char(out, pos.0 + size.0 - 1, y, '│', style)?;
    }

    draw_str(
        out,
        pos.0,
        pos.1 + size.1 - 1,
        &format!("╰{}╯", "─".repeat(size.0 as usize - 2)),
        style,
    )
}

pub fn popup_size(title: &str, texts: &[&str]) -> Dims {
    match texts.iter().map(|text| text.len()).max() {
        Some(l) => Dims(2 + 2 + l.max(title.len()) as i32, 2 + 2 + texts.len() as i32),
        None => Dims(4 + title.len() as i32, 3),
    }
}

pub fn render_popup(
    out: &mut impl Write,
    style: ContentStyle,
    title: &str,
    texts: &[&str],
) -> io::Result<()> {
    let box_size = popup_size(title, texts);
    let title_pos = box_center_screen(Dims(title.len() as i32 + 2, 1))?.0;
    let pos = box_center_screen(box_size)?;

    queue!(out, Clear(ClearType::All))?;

    draw_box(out, pos, box_size, style)?;
    draw_str(out, title_pos, pos.1 + 1, &format!(" {} ", title), style)?;

    if !texts.is_empty() {
        draw_str(
            out,
            pos.0 + 1,
            pos.1 + 2,
            &"─".repeat(box_size.0 as usize - 2),
            style,
        )?;
        for (i, text) in texts.iter().enumerate() {
            draw_str(out, pos.0 + 2, pos.1 + 3 + i as i32, text, style)?;
        }
    }

    out.flush()
}

/// Shows the popup until a key press and hands that key back.
pub fn run_popup(
    out: &mut impl Write,
    style: ContentStyle,
    title: &str,
    texts: &[&str],
) -> io::Result<KeyCode> {
    render_popup(out, style, title, texts)?;

    loop {
        match read()? {
            Event::Key(KeyEvent { code, kind, .. }) if !helpers::is_release(kind) => {
                break Ok(code);
            }
            Event::Resize(_, _) => render_popup(out, style, title, texts)?,
            _ => {}
        }
    }
}

pub fn draw_messages(
    out: &mut impl Write,
    frame_size: Dims,
    top: i32,
    style: ContentStyle,
) -> io::Result<()> {
    let logger = logging::get_logger();
    let source_style = ContentStyle {
        attributes: Attribute::Dim.into(),
        ..style
    };

    for (i, log) in logger.get_logs().take(logger.max_visible).enumerate() {
        let y = top + i as i32;
        let width = log.source.len() as i32 + 4 + log.message.len() as i32;
        let x = frame_size.0 - width - 2;

        let indicator_style = ContentStyle {
            foreground_color: Some(logging::level_color(log.level)),
            ..style
        };

        draw_str(out, x, y, &log.source, source_style)?;
        draw_str(out, x + log.source.len() as i32 + 1, y, "->", style)?;
        draw_str(out, x + log.source.len() as i32 + 4, y, &log.message, style)?;
        draw_char(out, frame_size.0 - 1, y, INDICATOR_CHAR, indicator_style)?;
    }

    Ok(())
}

pub fn format_duration(dur: Duration) -> String {
    format!(
        "{}m{:.1}s",
        dur.as_secs() / 60,
        (dur.as_secs() % 60) as f32 + dur.subsec_millis() as f32 / 1000f32,
    )
}
