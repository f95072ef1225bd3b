use std::process;
use std::time::Duration;

use log::{debug, error, info};

use amqpdump::amqp::amqp_config::AmqpConfig;
use amqpdump::amqp::AmqpClient;
use amqpdump::config::{init, Env};

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
    println!("Queue declared successfully.");

    // 3. Publish the message on a timer until Ctrl-C
    // tokio intervals cannot be zero
    let period = Duration::from_secs(env.publish_interval_secs.max(1));
    let mut interval = tokio::time::interval(period);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = interval.tick() => {
                match amqp_client.publish_message(env.publish_message.as_bytes()).await {
                    Ok(confirmation) => {
                        debug!(target: "app", "AMQP message published, confirmation = {:?}", confirmation);
                        println!("Message sent: {}", env.publish_message);
                    }
                    Err(err) => {
                        error!(target: "app", "Cannot publish AMQP message to exchange {}. Err = {:?}", env.amqp_exchange, err);
                        process::exit(1);
                    }
                }
            }
            _ = &mut shutdown => {
                info!(target: "app", "Ctrl-C received, stopping producer");
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
