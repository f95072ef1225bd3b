use std::fmt;
use std::io::{self, Write};

use lapin::message::Delivery;

use crate::dump::HexDump;

/// A consumed message with the routing metadata printed above its dump.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub delivery_tag: u64,
    pub exchange: String,
    pub routing_key: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Envelope {
    pub fn new(
        delivery_tag: u64,
        exchange: String,
        routing_key: String,
        content_type: Option<String>,
        body: Vec<u8>,
    ) -> Self {
        Self {
            delivery_tag,
            exchange,
            routing_key,
            content_type,
            body,
        }
    }

    pub fn from_delivery(delivery: &Delivery) -> Self {
        Self::new(
            delivery.delivery_tag,
            delivery.exchange.as_str().to_string(),
            delivery.routing_key.as_str().to_string(),
            delivery.properties.content_type().as_ref().map(|ct| ct.as_str().to_string()),
            delivery.data.clone(),
        )
    }

    /// Header lines only, up to and including the `----` separator.
    pub fn header(&self) -> Header<'_> {
        Header { envelope: self }
    }

    pub fn write_header<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.header())?;
        out.flush()
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self)?;
        out.flush()
    }
}

pub struct Header<'a> {
    envelope: &'a Envelope,
}

impl fmt::Display for Header<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let envelope = self.envelope;
        writeln!(
            fmt,
            "Delivery {}, exchange {} routingkey {}",
            envelope.delivery_tag, envelope.exchange, envelope.routing_key
        )?;
        if let Some(content_type) = &envelope.content_type {
            writeln!(fmt, "Content-type: {}", content_type)?;
        }
        writeln!(fmt, "----")
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.header())?;
        write!(fmt, "{}", HexDump::new(&self.body))
    }
}
