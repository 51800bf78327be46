use std::io::{self, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use super::simulation::{SimulatedAccelerometer, SimulationConfig};
use super::write_sample;
use crate::config::{Config, NetworkConfig};
use crate::error::Result;
use crate::processing::Sample;

// -----------------------------------------------------------------------------
// RUN CODE
// -----------------------------------------------------------------------------

pub fn run(config: &Config) -> Result<()> {
    config.simulation.validate()?;
    let listener = TcpListener::bind(&config.network.address)?;
    log::info!("streaming simulated samples on {}", listener.local_addr()?);

    for stream in listener.incoming() {
        let stream = stream?;
        let simulation = config.simulation.clone();
        let network = config.network.clone();
        let dt = config.detector.dt;

        thread::spawn(move || {
            let peer = stream
                .peer_addr()
                .map_or_else(|_| "unknown peer".to_string(), |addr| addr.to_string());
            log::info!("client connected: {}", peer);
            match handle_connection(stream, simulation, &network, dt) {
                Ok(sent) => log::info!("client {} done after {} samples", peer, sent),
                Err(e) => log::info!("client {} disconnected: {}", peer, e),
            }
        });
    }

    Ok(())
}

// -----------------------------------------------------------------------------
// SENDING DATA
// -----------------------------------------------------------------------------

/// Streams a fresh simulated accelerometer to one client until the client
/// hangs up or `max_samples` have been sent.
pub fn handle_connection(
    mut stream: TcpStream,
    simulation: SimulationConfig,
    network: &NetworkConfig,
    dt: f64,
) -> Result<usize> {
    let simulator = SimulatedAccelerometer::new(simulation, dt)?;
    let pace = network.realtime.then(|| Duration::from_secs_f64(dt));

    let sent = match network.max_samples {
        Some(limit) => stream_samples(&mut stream, simulator.take(limit), pace)?,
        None => stream_samples(&mut stream, simulator, pace)?,
    };
    stream.flush()?;
    Ok(sent)
}

/// Writes samples in wire format, sleeping `pace` between them. Returns the
/// number of samples written.
pub fn stream_samples<W, I>(writer: &mut W, samples: I, pace: Option<Duration>) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = Sample>,
{
    let mut sent = 0;
    for sample in samples {
        write_sample(writer, &sample)?;
        sent += 1;
        if let Some(pace) = pace {
            thread::sleep(pace);
        }
    }
    Ok(sent)
}
