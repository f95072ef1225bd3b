use std::io;
use std::process;

use futures::stream::StreamExt;
use lapin::message::Delivery;
use log::{debug, error, info, warn};

use amqpdump::amqp::amqp_config::AmqpConfig;
use amqpdump::amqp::AmqpClient;
use amqpdump::config::{init, Env};
use amqpdump::dump::amqp_dump;
use amqpdump::models::envelope::Envelope;

#[tokio::main]
async fn main() {
    // 1. Init logger and env variables
    let env: Env = init().unwrap_or_else(|err| {
        eprintln!("Cannot initialize application: {:?}", err);
        process::exit(1);
    });

    // 2. Init RabbitMQ, any failure here is fatal
    info!(target: "app", "Initializing RabbitMQ");
    let mut amqp_client = AmqpClient::new(AmqpConfig::new(&env));
    if let Err(err) = amqp_client.connect().await {
        error!(target: "app", "Cannot connect to AMQP broker. Err = {:?}", err);
        process::exit(1);
    }
    if let Err(err) = amqp_client.declare_queue().await {
        error!(target: "app", "Cannot declare AMQP queue {}. Err = {:?}", env.amqp_queue_name, err);
        process::exit(1);
    }
    if let Err(err) = amqp_client.bind_queue().await {
        error!(target: "app", "Cannot bind AMQP queue {}. Err = {:?}", env.amqp_queue_name, err);
        process::exit(1);
    }
    let mut consumer = amqp_client.consume().await.unwrap_or_else(|err| {
        error!(target: "app", "Cannot consume AMQP queue {}. Err = {:?}", env.amqp_queue_name, err);
        process::exit(1);
    });

    // 3. Dump every delivery until the stream ends or Ctrl-C
    println!("Waiting for messages from queue: {}", env.amqp_queue_name);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            next = consumer.next() => match next {
                Some(Ok(delivery)) => process_delivery(&amqp_client, &delivery).await,
                Some(Err(err)) => {
                    warn!(target: "app", "AMQP consumer error, stopping. Err = {:?}", err);
                    break;
                }
                None => {
                    info!(target: "app", "AMQP consumer stream ended");
                    break;
                }
            },
            _ = &mut shutdown => {
                info!(target: "app", "Ctrl-C received, stopping consumer");
                break;
            }
        }
    }

    // 4. Cleanup
    if let Err(err) = amqp_client.close().await {
        error!(target: "app", "Cannot close AMQP client. Err = {:?}", err);
        process::exit(1);
    }
}

async fn process_delivery(amqp_client: &AmqpClient, delivery: &Delivery) {
    debug!(target: "app", "process_delivery - delivery {} received, {} bytes", delivery.delivery_tag, delivery.data.len());
    let envelope = Envelope::from_delivery(delivery);
    // header under its own stdout lock, then the body through the dumper
    let header_written = envelope.write_header(&mut io::stdout().lock());
    let written = header_written.and_then(|_| amqp_dump(&envelope.body));
    if let Err(err) = written {
        error!(target: "app", "process_delivery - cannot write delivery {} to stdout. Err = {:?}", delivery.delivery_tag, err);
        process::exit(1);
    }
    if let Err(err) = amqp_client.ack(delivery).await {
        error!(target: "app", "process_delivery - cannot ack delivery {}. Err = {:?}", delivery.delivery_tag, err);
        process::exit(1);
    }
}
