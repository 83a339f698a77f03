use crumb::{options::SerializeOptions, SameSite, Signer};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

// Visit counter kept in a signed cookie. Edit the cookie in the browser
// devtools and the counter starts over.
#[tokio::main]
async fn main() {
    let signer = Signer::new("demo secret, do not reuse");

    let listener = TcpListener::bind("127.0.0.1:8080").await.unwrap();
    println!("Listening on http://127.0.0.1:8080");

    loop {
        let (mut stream, _) = listener.accept().await.unwrap();

        tokio::spawn(async move {
            let mut buffer = vec![0; 4096];
            let Ok(len) = stream.read(&mut buffer).await else {
                return;
            };
            let request = String::from_utf8_lossy(&buffer[..len]);

            let visits = cookie_header(&request)
                .and_then(|header| crumb::parse(header).ok())
                .and_then(|cookies| {
                    let signed = cookies.get("visits")?;
                    signer.unsign(signed).ok()?.parse::<u64>().ok()
                })
                .unwrap_or(0)
                + 1;

            let attributes = SerializeOptions {
                path: Some("/"),
                http_only: true,
                same_site: Some(SameSite::Lax),
                ..SerializeOptions::default()
            };
            let set_cookie =
                crumb::serialize("visits", &signer.sign(&visits.to_string()), &attributes).unwrap();

            let body = format!("Visit number {}\n", visits);
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\n\
                 Set-Cookie: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                set_cookie,
                body
            );
            let _ = stream.write_all(response.as_bytes()).await;
        });
    }
}

fn cookie_header(request: &str) -> Option<&str> {
    request
        .split("\r\n")
        .skip(1)
        .take_while(|line| !line.is_empty())
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("cookie").then(|| value.trim())
        })
}
