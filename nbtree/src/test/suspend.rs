use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::executor::block_on;
use futures::io::{AsyncRead, AsyncWrite};

use crate::codec;
use crate::error::Error;
use crate::test::builder::Builder;
use crate::{Compound, IntArray, NbtTree, ReadOptions, TagList, TagNode, TagType};

/// Hands out one byte per poll, with a `Pending` between every byte. Once
/// `fail_after` bytes have been read it errors instead of continuing.
struct Trickle {
    data: Vec<u8>,
    pos: usize,
    ready: bool,
    fail_after: Option<usize>,
}

impl Trickle {
    fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            pos: 0,
            ready: false,
            fail_after: None,
        }
    }

    fn failing_after(data: Vec<u8>, n: usize) -> Self {
        Self {
            fail_after: Some(n),
            ..Self::new(data)
        }
    }
}

impl AsyncRead for Trickle {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        if !self.ready {
            self.ready = true;
            cx.waker().wake_by_ref();
            return Poll::Pending;
        }
        self.ready = false;

        if self.fail_after == Some(self.pos) {
            return Poll::Ready(Err(io::Error::new(
                io::ErrorKind::ConnectionAborted,
                "source closed",
            )));
        }
        if self.pos == self.data.len() || buf.is_empty() {
            return Poll::Ready(Ok(0));
        }

        buf[0] = self.data[self.pos];
        self.pos += 1;
        Poll::Ready(Ok(1))
    }
}

/// Accepts one byte per poll, with a `Pending` between every byte.
#[derive(Default)]
struct Drip {
    written: Vec<u8>,
    ready: bool,
    flushed: bool,
}

impl AsyncWrite for Drip {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        if !self.ready {
            self.ready = true;
            cx.waker().wake_by_ref();
            return Poll::Pending;
        }
        self.ready = false;

        match buf.first() {
            Some(b) => {
                self.written.push(*b);
                Poll::Ready(Ok(1))
            }
            None => Poll::Ready(Ok(0)),
        }
    }

    fn poll_flush(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        self.flushed = true;
        Poll::Ready(Ok(()))
    }

    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

fn sample_input() -> Vec<u8> {
    Builder::new()
        .start_compound("root")
        .int("x", 42)
        .string("name", "trickle")
        .start_list("l", TagType::Short, 2)
        .short_payload(1)
        .short_payload(-1)
        .int_array("a", &[1, 2, 3])
        .start_compound("inner")
        .double("d", 0.5)
        .end_compound()
        .end_compound()
        .build()
}

#[test]
fn async_decode_matches_sync_with_partial_reads() {
    let input = sample_input();
    let opts = ReadOptions::default();

    let sync = codec::read_root(input.as_slice(), &opts).unwrap();
    let trickled = block_on(codec::read_root_async(Trickle::new(input.clone()), &opts)).unwrap();
    assert_eq!(trickled, sync);
}

#[test]
fn async_encode_matches_sync_with_partial_writes() {
    let (name, root) = codec::read_root(sample_input().as_slice(), &ReadOptions::default())
        .unwrap()
        .unwrap();

    let mut sink = Drip::default();
    block_on(codec::write_root_async(&mut sink, &name, &root)).unwrap();
    assert_eq!(sink.written, sample_input());
    assert!(sink.flushed);
}

#[test]
fn async_tree_roundtrip() {
    let mut tree = NbtTree::new();
    block_on(tree.read_from_async(Trickle::new(sample_input()))).unwrap();
    assert_eq!(tree.name(), "root");

    let mut sink = Drip::default();
    block_on(tree.write_to_async(&mut sink)).unwrap();
    assert_eq!(sink.written, sample_input());
}

#[test]
fn source_running_dry_is_end_of_stream() {
    let mut input = sample_input();
    input.truncate(input.len() - 3);

    let result = block_on(codec::read_root_async(
        Trickle::new(input),
        &ReadOptions::default(),
    ));
    assert!(matches!(result, Err(Error::UnexpectedEndOfStream)));
}

#[test]
fn closed_source_is_io_error() {
    let mut tree = NbtTree::new();
    let result = block_on(tree.read_from_async(Trickle::failing_after(sample_input(), 10)));

    match result {
        Err(e @ Error::Io(_)) => assert!(e.is_io()),
        other => panic!("unexpected {:?}", other),
    }
    assert!(tree.root().unwrap().is_empty());
}

#[test]
fn async_payloads() {
    let node = TagNode::List(
        TagList::from_nodes(
            TagType::IntArray,
            vec![
                TagNode::IntArray(IntArray::new(vec![1, 2])),
                TagNode::IntArray(IntArray::new(vec![])),
            ],
        )
        .unwrap(),
    );

    let mut sink = Drip::default();
    block_on(codec::write_payload_async(&mut sink, &node)).unwrap();

    let decoded = block_on(codec::read_payload_async(
        Trickle::new(sink.written),
        TagType::List,
    ))
    .unwrap();
    assert_eq!(decoded, node);
}

#[test]
fn named_and_payload_writes_flush() {
    let node = TagNode::from("flushed");

    let mut named = Drip::default();
    block_on(codec::write_named_async(&mut named, "s", &node)).unwrap();
    assert_eq!(named.written, Builder::new().string("s", "flushed").build());
    assert!(named.flushed);

    let mut payload = Drip::default();
    block_on(codec::write_payload_async(&mut payload, &node)).unwrap();
    assert_eq!(payload.written, Builder::new().string_payload("flushed").build());
    assert!(payload.flushed);
}

#[test]
fn interleaved_decodes() {
    let mut other = Compound::new();
    other.insert("y".to_owned(), TagNode::Long(7));
    let mut other_bytes = Vec::new();
    codec::write_root(&mut other_bytes, "other", &other).unwrap();

    let opts = ReadOptions::default();
    let (a, b) = block_on(async {
        futures::join!(
            codec::read_root_async(Trickle::new(sample_input()), &opts),
            codec::read_root_async(Trickle::new(other_bytes), &opts),
        )
    });

    assert_eq!(a.unwrap().unwrap().0, "root");
    assert_eq!(b.unwrap().unwrap(), ("other".to_owned(), other));
}
