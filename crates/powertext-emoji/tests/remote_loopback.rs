use std::io::{Cursor, Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use powertext_emoji::{CdnStyle, EmojiError, EmojiImageSource, EmojiResolver, RemoteEmojiSource};

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(w, h, Rgba([10, 200, 30, 255]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

/// Serve `responses` one connection at a time and report the request lines seen.
fn serve(responses: Vec<(u16, Vec<u8>)>) -> (String, thread::JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let mut seen = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let n = stream.read(&mut buf).unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            seen.push(request.lines().next().unwrap_or_default().to_string());
            let reason = if status == 200 { "OK" } else { "Not Found" };
            let header = format!(
                "HTTP/1.1 {status} {reason}\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            stream.write_all(header.as_bytes()).unwrap();
            stream.write_all(&body).unwrap();
            stream.flush().unwrap();
        }
        seen
    });
    (format!("http://{addr}"), handle)
}

#[test]
fn fetches_and_decodes_from_template_url() {
    let (base, server) = serve(vec![(200, png_bytes(12, 12))]);
    let source = RemoteEmojiSource::with_timeout(
        CdnStyle::Template(format!("{base}/assets/{{code}}.png")),
        Duration::from_secs(5),
    )
    .unwrap();

    let resolver = EmojiResolver::new(source);
    let asset = resolver.resolve("\u{1F600}").unwrap();
    assert_eq!(asset.natural_size(), (12, 12));

    // Served from cache; the server only accepts one connection.
    let again = resolver.resolve("\u{1F600}").unwrap();
    assert_eq!(again.natural_size(), (12, 12));

    let seen = server.join().unwrap();
    assert_eq!(seen, vec!["GET /assets/1f600.png HTTP/1.1".to_string()]);
}

#[test]
fn non_success_status_is_an_error() {
    let (base, server) = serve(vec![(404, Vec::new())]);
    let source = RemoteEmojiSource::with_timeout(
        CdnStyle::Template(format!("{base}/{{code}}.png")),
        Duration::from_secs(5),
    )
    .unwrap();

    let key = source.canonicalize("\u{1F680}");
    match source.resolve(&key) {
        Err(EmojiError::Status { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected status error, got {other:?}"),
    }
    server.join().unwrap();
}
