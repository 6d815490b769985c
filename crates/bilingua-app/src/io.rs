use std::io::{self, BufRead};
use std::thread;

use kanal::{AsyncReceiver, AsyncSender};

/// Forward lines from `reader` on a dedicated thread.
///
/// Reads block, so they never run on the runtime. When the pruner stops, the
/// thread is simply left behind in its read; it ends with the process.
pub fn spawn_line_reader<R>(reader: R) -> io::Result<AsyncReceiver<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = kanal::unbounded_async::<String>();

    thread::Builder::new()
        .name("operator-input".to_string())
        .spawn(move || forward_lines(reader, tx))?;

    Ok(rx)
}

/// Bytes that are not UTF-8 are replaced rather than ending the input;
/// only end of input or a failed read stop the loop
fn forward_lines<R: BufRead>(mut reader: R, tx: AsyncSender<String>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\r', '\n']).to_string();
                if tx.try_send(line).is_err() {
                    break;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::debug!("Operator input failed: {}", e);
                break;
            }
        }
    }
    tracing::debug!("Operator input closed");
}

pub fn spawn_stdin_reader() -> io::Result<AsyncReceiver<String>> {
    spawn_line_reader(io::BufReader::new(io::stdin()))
}
