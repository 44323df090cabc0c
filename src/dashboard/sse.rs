//! Incremental decoder for `text/event-stream` bodies.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    pub event: Option<String>,
    pub data: String,
}

#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
}

impl SseDecoder {
    /// Feeds a chunk of the body and returns every event it completed.
    /// Chunks may split lines, or multi-byte characters, anywhere.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(end) = self.buffer.iter().position(|b| *b == b'\n') {
            let mut line: Vec<u8> = self.buffer.drain(..=end).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }

            let line = String::from_utf8_lossy(&line);
            if let Some(event) = self.process_line(&line) {
                events.push(event);
            }
        }
        events
    }

    fn process_line(&mut self, line: &str) -> Option<SseEvent> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<SseEvent> {
        let event = self.event.take();
        if self.data.is_empty() {
            return None;
        }

        let data = self.data.join("\n");
        self.data.clear();
        Some(SseEvent { event, data })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decodes_named_event() {
        let mut decoder = SseDecoder::default();

        let events = decoder.push(b"event: change\ndata: {\"a\":1}\n\n");

        assert_eq!(
            events,
            vec![SseEvent {
                event: Some("change".to_string()),
                data: "{\"a\":1}".to_string(),
            }]
        );
    }

    #[test]
    fn handles_lines_split_across_chunks() {
        let mut decoder = SseDecoder::default();

        assert!(decoder.push(b"event: cha").is_empty());
        assert!(decoder.push(b"nge\r\ndata: 4").is_empty());
        let events = decoder.push(b"2\r\n\r\n");

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, "42");
    }

    #[test]
    fn ignores_keep_alive_comments() {
        let mut decoder = SseDecoder::default();

        assert!(decoder.push(b":\n\n: ping\n\n").is_empty());
    }

    #[test]
    fn joins_multi_line_data() {
        let mut decoder = SseDecoder::default();

        let events = decoder.push(b"data: one\ndata: two\n\n");

        assert_eq!(events[0].event, None);
        assert_eq!(events[0].data, "one\ntwo");
    }

    #[test]
    fn keeps_multi_byte_characters_split_between_chunks() {
        let mut decoder = SseDecoder::default();
        let bytes = "data: café\n\n".as_bytes();
        let (head, tail) = bytes.split_at(10);

        assert!(decoder.push(head).is_empty());
        assert_eq!(decoder.push(tail)[0].data, "café");
    }
}
